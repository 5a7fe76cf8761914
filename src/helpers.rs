pub mod html;
pub mod loading;
pub mod plotly;
