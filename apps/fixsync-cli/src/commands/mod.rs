pub mod decisions;
pub mod diagnose;
pub mod issues;
pub mod save;
