//! GATT services and characteristics used by the supported scales.

use uuid::{Uuid, uuid};

pub const TRISA_SERVICE: Uuid = uuid!("00007802-0000-1000-8000-00805f9b34fb");
pub const TRISA_MEASUREMENT: Uuid = uuid!("00008a21-0000-1000-8000-00805f9b34fb");
pub const TRISA_DOWNLOAD_COMMAND: Uuid = uuid!("00008a81-0000-1000-8000-00805f9b34fb");
pub const TRISA_UPLOAD_COMMAND: Uuid = uuid!("00008a82-0000-1000-8000-00805f9b34fb");

pub const MI_BODY_COMPOSITION_SERVICE: Uuid = uuid!("0000181b-0000-1000-8000-00805f9b34fb");
pub const MI_BODY_COMPOSITION_MEASUREMENT: Uuid = uuid!("00002a9c-0000-1000-8000-00805f9b34fb");
pub const MI_CURRENT_TIME: Uuid = uuid!("00002a2b-0000-1000-8000-00805f9b34fb");
pub const MI_HISTORY: Uuid = uuid!("00002a2f-0000-3512-2118-0009af100700");
pub const MI_CUSTOM_SERVICE: Uuid = uuid!("00001530-0000-3512-2118-0009af100700");
pub const MI_CUSTOM_CONFIG: Uuid = uuid!("00001542-0000-3512-2118-0009af100700");

pub const ONEBYONE_SERVICE: Uuid = uuid!("0000fff0-0000-1000-8000-00805f9b34fb");
pub const ONEBYONE_MEASUREMENT: Uuid = uuid!("0000fff4-0000-1000-8000-00805f9b34fb");
pub const ONEBYONE_COMMAND: Uuid = uuid!("0000fff1-0000-1000-8000-00805f9b34fb");

pub const ONEBYONE_NEW_SERVICE: Uuid = uuid!("0000ffb0-0000-1000-8000-00805f9b34fb");
pub const ONEBYONE_NEW_COMMAND: Uuid = uuid!("0000ffb1-0000-1000-8000-00805f9b34fb");
pub const ONEBYONE_NEW_MEASUREMENT: Uuid = uuid!("0000ffb2-0000-1000-8000-00805f9b34fb");

pub const SOEHNLE_SERVICE: Uuid = uuid!("352e3000-28e9-40b8-a361-6db4cca4147c");
pub const SOEHNLE_MEASUREMENT: Uuid = uuid!("352e3001-28e9-40b8-a361-6db4cca4147c");
pub const SOEHNLE_COMMAND: Uuid = uuid!("352e3002-28e9-40b8-a361-6db4cca4147c");

pub const YUNMAI_MEASUREMENT_SERVICE: Uuid = uuid!("0000ffe0-0000-1000-8000-00805f9b34fb");
pub const YUNMAI_MEASUREMENT: Uuid = uuid!("0000ffe4-0000-1000-8000-00805f9b34fb");
pub const YUNMAI_COMMAND_SERVICE: Uuid = uuid!("0000ffe5-0000-1000-8000-00805f9b34fb");
pub const YUNMAI_COMMAND: Uuid = uuid!("0000ffe9-0000-1000-8000-00805f9b34fb");

// QN scales come in two GATT layouts
pub const QN_TYPE1_SERVICE: Uuid = uuid!("0000ffe0-0000-1000-8000-00805f9b34fb");
pub const QN_TYPE1_MEASUREMENT: Uuid = uuid!("0000ffe1-0000-1000-8000-00805f9b34fb");
pub const QN_TYPE1_CONFIG: Uuid = uuid!("0000ffe3-0000-1000-8000-00805f9b34fb");
pub const QN_TYPE1_TIME: Uuid = uuid!("0000ffe4-0000-1000-8000-00805f9b34fb");
pub const QN_TYPE2_SERVICE: Uuid = uuid!("0000fff0-0000-1000-8000-00805f9b34fb");
pub const QN_TYPE2_MEASUREMENT: Uuid = uuid!("0000fff1-0000-1000-8000-00805f9b34fb");
pub const QN_TYPE2_COMMAND: Uuid = uuid!("0000fff2-0000-1000-8000-00805f9b34fb");
