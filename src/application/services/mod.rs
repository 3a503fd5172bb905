mod generation_loop;
mod job_message;
mod job_processor;
mod queue_consumer;
mod response_extractor;

pub use generation_loop::{
    GenerationConfig, GenerationLoop, GenerationOutcome, GenerationStrategy, TerminalReason,
};
pub use job_message::{InputFile, JobMessage};
pub use job_processor::{JobProcessor, JobProcessorError};
pub use queue_consumer::{BatchOutcome, ConsumerError, QueueConsumer};
pub use response_extractor::{DelimiterPair, ResponseExtractor};
