pub mod branch;
pub mod commit;
pub mod issue;
