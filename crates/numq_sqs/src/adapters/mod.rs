pub mod line_sink;
pub mod pacer;
pub mod queue;
