use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("The processor has already been shut down")]
    Shutdown,
    #[error("The context deadline passed before the operation completed")]
    DeadlineExceeded,
    #[error("An IO error occured. {0}")]
    Io(#[from] std::io::Error),
    #[error("Processor failed. {0}")]
    Failed(String),
}
