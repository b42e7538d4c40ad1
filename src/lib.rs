pub mod error;
pub mod http;
pub mod io;
pub mod models;
pub mod stages;
pub mod text;

pub use error::{NameError, ProtocolError};
pub use http::{BundestagClient, DocumentSource, HttpConfig, ListingSource};
pub use io::{DataLayout, parse_protocol};
pub use models::{PoliticianName, Protocol, SpecialTokens, TrainingSample};
pub use stages::{
    AssembleConfig, LinkCollectorConfig, SpeechCrawlConfig, clean_directory,
    execute_assembly, execute_link_collection, execute_speech_crawl,
};
pub use text::{Language, SentenceSplitter};
