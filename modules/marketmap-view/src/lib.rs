pub mod collision;
pub mod heatmap;
pub mod pins;
pub mod selection;
pub mod surface;

pub use collision::CollisionResolver;
pub use heatmap::{build_layer, HeatmapLayerSpec, WeightedPoint};
pub use pins::{render_pins, RenderedPin, VisibilityToggles};
pub use selection::{
    unify, ExplanationGroup, PanelState, ScoreDirection, Selection, SelectionController,
};
pub use surface::{LayerSpec, MapHandle, MapSurface};
