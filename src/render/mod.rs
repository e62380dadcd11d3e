pub mod canvas;
pub mod chart;
pub mod mindmap;
pub mod text;
pub mod theme;
