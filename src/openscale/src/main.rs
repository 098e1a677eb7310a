#[macro_use]
extern crate log;

use anyhow::anyhow;
use chrono::Utc;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use openscale::{VendorCodec, decode_notification, vendor_from_name};
use openscale_codec::{OneByoneParser, QnParser, TrisaCommand};
use openscale_types::{ActivityLevel, Sex, UserProfile, VendorId, WeightUnit};
use strum::IntoEnumIterator;

#[derive(Parser)]
pub struct OpenScaleCli {
    #[arg(env, long, default_value_t = Sex::Male)]
    pub sex: Sex,
    /// Age in whole years
    #[arg(env, long, default_value_t = 0)]
    pub age: u16,
    /// Height in centimeters, body composition is skipped without it
    #[arg(env, long)]
    pub height: Option<f32>,
    #[arg(env, long, default_value_t = ActivityLevel::Sedentary)]
    pub activity: ActivityLevel,
    #[arg(env, long, default_value_t = WeightUnit::Kg)]
    pub unit: WeightUnit,
    #[clap(subcommand)]
    pub subcommand: OpenScaleCommand,
}

#[derive(Subcommand)]
pub enum OpenScaleCommand {
    ///
    /// Decode captured notifications (hex) and print one JSON measurement per frame
    ///
    Decode {
        #[arg(long, env, value_parser = vendor_from_name)]
        vendor: VendorId,
        /// Frames come from the Mi Scale history characteristic
        #[arg(long)]
        history: bool,
        frames: Vec<String>,
    },
    ///
    /// List supported vendors and their GATT endpoints
    ///
    Vendors,
    ///
    /// Print the clock (and unit) commands a scale expects right now
    ///
    SyncClock {
        #[arg(long, env, value_parser = vendor_from_name)]
        vendor: VendorId,
        /// QN protocol type, as reported by the scale's info frame
        #[arg(long, default_value_t = 0)]
        protocol_type: u8,
    },
}

impl OpenScaleCli {
    fn profile(&self) -> Option<UserProfile> {
        let height = self.height?;
        Some(
            UserProfile::new(self.sex, self.age, height)
                .with_activity(self.activity)
                .with_unit(self.unit),
        )
    }
}

fn main() -> anyhow::Result<()> {
    if let Err(error) = dotenv() {
        println!("{}", error);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = OpenScaleCli::parse();
    let profile = cli.profile();

    match cli.subcommand {
        OpenScaleCommand::Decode {
            vendor,
            history,
            frames,
        } => {
            let codec = match (vendor, history) {
                (VendorId::MiScale, true) => VendorCodec::mi_scale_history(),
                (_, true) => return Err(anyhow!("{vendor} has no history parser")),
                _ => VendorCodec::for_vendor(vendor),
            };

            for notification in frames {
                let bytes = hex::decode(notification.replace([':', ' '], ""))?;
                let received_at = Utc::now();
                for result in decode_notification(&codec, &bytes, profile.as_ref(), received_at) {
                    match result {
                        Ok(measurement) => {
                            info!(
                                "{vendor}: {:.2} {}",
                                cli.unit.from_kilogram(measurement.weight_kg),
                                cli.unit
                            );
                            println!("{}", serde_json::to_string(&measurement)?);
                        }
                        Err(error) => warn!("{vendor}: frame dropped: {error}"),
                    }
                }
            }

            Ok(())
        }
        OpenScaleCommand::Vendors => {
            for vendor in VendorId::iter() {
                let codec = VendorCodec::for_vendor(vendor);
                println!("{vendor}");
                println!("  service:     {}", codec.service);
                println!("  measurement: {}", codec.measurement);
            }
            Ok(())
        }
        OpenScaleCommand::SyncClock {
            vendor,
            protocol_type,
        } => {
            let now = Utc::now();
            match vendor {
                VendorId::Trisa => {
                    let command = TrisaCommand::set_time(now.timestamp_millis())?;
                    println!("{command}");
                }
                VendorId::OneByone => {
                    println!("clock: {}", hex::encode(OneByoneParser::clock_command(now)));
                    println!(
                        "unit:  {}",
                        hex::encode(OneByoneParser::unit_command(cli.unit))
                    );
                }
                VendorId::QnScale => {
                    println!("clock: {}", hex::encode(QnParser::time_command(now)?));
                    println!(
                        "unit:  {}",
                        hex::encode(QnParser::unit_command(protocol_type, cli.unit))
                    );
                }
                _ => return Err(anyhow!("{vendor} has no clock command")),
            }
            Ok(())
        }
    }
}
