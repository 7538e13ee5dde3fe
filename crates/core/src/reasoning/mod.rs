pub mod escalation;
pub mod explain;
pub mod matcher;
pub mod traversal;
