pub mod run;
pub mod stress;
