pub mod chart;
pub mod document;
pub mod mindmap;
pub mod outline;
