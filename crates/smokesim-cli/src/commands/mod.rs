pub mod mask;
pub mod run;
