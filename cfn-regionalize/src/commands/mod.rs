pub mod regionalize;
