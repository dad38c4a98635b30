pub mod error;
pub mod extract;
pub mod fetch;
pub mod parse;
pub mod postprocess;
pub mod preprocess;
pub mod readability;
pub mod scoring;
pub mod summarize;

pub use error::{ErrorKind, PrecisError, Result};
pub use extract::{ContentExtractor, ExtractedText, extract_text, extract_text_with_config, paragraphs_from_html};
pub use fetch::{DEFAULT_FETCH_TIMEOUT, FetchConfig, FetchedDocument, fetch_url};
pub use parse::Document;
#[doc(hidden)]
pub use postprocess::{PostProcessConfig, postprocess_html};
#[doc(hidden)]
pub use preprocess::{PreprocessConfig, preprocess_html};
pub use readability::{Readability, ReadabilityConfig, ReadabilityConfigBuilder, ReadableContent};
#[doc(hidden)]
pub use scoring::{ScoreConfig, base_tag_score, class_id_weight, link_density};
pub use summarize::{
    API_KEY_ENV, ApiKey, ChatCompletion, ChatRequest, ChatResponse, DEFAULT_LANGUAGE, DEFAULT_MAX_WORDS, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE, Message, OpenAiClient, PromptTemplate, Summarizer, SummaryConfig, SummaryConfigBuilder,
    SummaryRequest, build_chat_request, resolve_api_key, resolve_api_key_with, summarize,
};
