//! Adapters implementing application ports.

mod collection_translator;
mod reqwest_client;
mod system_clock;

pub use collection_translator::JsonCollectionTranslator;
pub use reqwest_client::ReqwestHttpClient;
pub use system_clock::SystemClock;
