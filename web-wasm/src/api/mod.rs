//! 外部API呼び出し

pub mod relay;
