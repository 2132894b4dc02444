pub mod remote;
pub mod storage;
