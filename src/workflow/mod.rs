pub mod commit;
pub mod setup;
