pub mod duration;
pub mod rank_output;
pub mod resolve;
pub mod test_type;
