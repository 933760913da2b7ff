pub mod arcs;
pub mod basemap;
pub mod overlay;
pub mod sprites;
pub mod symbology;
