//! Data module - CSV loading, cleanup, splitting and persistence

mod loader;
mod processor;
mod splitter;
mod writer;

pub use loader::{CsvSource, DataLoader, LoaderError};
pub use processor::{DataProcessor, ProcessorError};
pub use splitter::{split_train_test, SplitError, TrainTestSplit};
pub use writer::{DataWriter, WriterError, TEST_FILE, TRAIN_FILE};
