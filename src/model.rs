pub mod issue;
pub mod storage;
