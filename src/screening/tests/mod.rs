mod common;

mod classifier;
mod evaluators;
