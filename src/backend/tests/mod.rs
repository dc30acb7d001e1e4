use super::*;

mod utils;
mod volume;
