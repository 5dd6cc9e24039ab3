pub mod completion_llm;
pub mod component_store;

pub use completion_llm::OpenAiCompletionAdapter;
pub use component_store::FsComponentStore;
