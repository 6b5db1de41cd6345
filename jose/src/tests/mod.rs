mod fixtures;
mod storage;
