mod firestore_codec_tests;
mod router_tests;
pub mod utils;
