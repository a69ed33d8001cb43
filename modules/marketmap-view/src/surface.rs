//! The only imperative seam. The core computes desired layer specs;
//! `MapSurface` diffs them against what the live map currently has and
//! issues the minimal add/update/remove calls through a `MapHandle`.

use std::collections::BTreeMap;

use marketmap_common::Category;

use crate::heatmap::HeatmapLayerSpec;
use crate::pins::RenderedPin;

/// Desired state of one map layer, as plain data.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerSpec {
    Heatmap(HeatmapLayerSpec),
    Markers {
        category: Category,
        pins: Vec<RenderedPin>,
    },
}

impl LayerSpec {
    pub fn id(&self) -> String {
        match self {
            LayerSpec::Heatmap(_) => "density".to_string(),
            LayerSpec::Markers { category, .. } => format!("markers-{category}"),
        }
    }
}

/// The live map instance. Implementations wrap a concrete map SDK; the
/// core only ever talks to this trait.
pub trait MapHandle {
    fn add_layer(&mut self, id: &str, spec: &LayerSpec);
    fn update_layer(&mut self, id: &str, spec: &LayerSpec);
    fn remove_layer(&mut self, id: &str);
    fn set_style(&mut self, style: &str);
}

/// Owns the handle and the record of what is currently attached.
pub struct MapSurface<H: MapHandle> {
    handle: H,
    attached: BTreeMap<String, LayerSpec>,
}

impl<H: MapHandle> MapSurface<H> {
    pub fn new(handle: H) -> Self {
        Self {
            handle,
            attached: BTreeMap::new(),
        }
    }

    /// Reconcile the live map with `desired`: add layers the map lacks,
    /// update layers whose spec changed, remove layers no longer wanted.
    /// Unchanged layers are left alone.
    pub fn sync(&mut self, desired: &[LayerSpec]) {
        let mut next = BTreeMap::new();
        for spec in desired {
            next.insert(spec.id(), spec.clone());
        }

        let stale: Vec<String> = self
            .attached
            .keys()
            .filter(|id| !next.contains_key(*id))
            .cloned()
            .collect();
        for id in stale {
            self.handle.remove_layer(&id);
            self.attached.remove(&id);
        }

        for (id, spec) in next {
            match self.attached.get(&id) {
                None => {
                    self.handle.add_layer(&id, &spec);
                    self.attached.insert(id, spec);
                }
                Some(current) if *current != spec => {
                    self.handle.update_layer(&id, &spec);
                    self.attached.insert(id, spec);
                }
                Some(_) => {}
            }
        }
    }

    /// Swap the base style. Style loads drop custom layers, so everything
    /// attached is re-added on top of the new style.
    pub fn swap_style(&mut self, style: &str) {
        self.handle.set_style(style);
        for (id, spec) in &self.attached {
            self.handle.add_layer(id, spec);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heatmap::build_layer;
    use marketmap_common::GeoPoint;

    #[derive(Debug, Default)]
    struct RecordingHandle {
        ops: Vec<String>,
    }

    impl MapHandle for RecordingHandle {
        fn add_layer(&mut self, id: &str, _spec: &LayerSpec) {
            self.ops.push(format!("add:{id}"));
        }
        fn update_layer(&mut self, id: &str, _spec: &LayerSpec) {
            self.ops.push(format!("update:{id}"));
        }
        fn remove_layer(&mut self, id: &str) {
            self.ops.push(format!("remove:{id}"));
        }
        fn set_style(&mut self, style: &str) {
            self.ops.push(format!("style:{style}"));
        }
    }

    fn marker_layer(category: Category, lat: f64) -> LayerSpec {
        LayerSpec::Markers {
            category,
            pins: vec![RenderedPin {
                category,
                record_index: 0,
                position: GeoPoint { lat, lng: 0.0 },
            }],
        }
    }

    #[test]
    fn first_sync_adds_every_layer() {
        let mut surface = MapSurface::new(RecordingHandle::default());
        surface.sync(&[
            LayerSpec::Heatmap(build_layer(&[])),
            marker_layer(Category::Competitors, 1.0),
        ]);
        assert_eq!(
            surface.handle.ops,
            vec!["add:density", "add:markers-competitors"]
        );
    }

    #[test]
    fn unchanged_layers_are_not_touched() {
        let mut surface = MapSurface::new(RecordingHandle::default());
        let layers = vec![marker_layer(Category::Investors, 1.0)];
        surface.sync(&layers);
        surface.sync(&layers);
        assert_eq!(surface.handle.ops, vec!["add:markers-investors"]);
    }

    #[test]
    fn changed_spec_updates_in_place() {
        let mut surface = MapSurface::new(RecordingHandle::default());
        surface.sync(&[marker_layer(Category::Investors, 1.0)]);
        surface.sync(&[marker_layer(Category::Investors, 2.0)]);
        assert_eq!(
            surface.handle.ops,
            vec!["add:markers-investors", "update:markers-investors"]
        );
    }

    #[test]
    fn absent_layers_are_removed() {
        let mut surface = MapSurface::new(RecordingHandle::default());
        surface.sync(&[
            marker_layer(Category::Investors, 1.0),
            marker_layer(Category::Cofounders, 1.0),
        ]);
        surface.sync(&[marker_layer(Category::Investors, 1.0)]);
        assert!(surface
            .handle
            .ops
            .contains(&"remove:markers-cofounders".to_string()));
    }

    #[test]
    fn style_swap_reattaches_attached_layers() {
        let mut surface = MapSurface::new(RecordingHandle::default());
        surface.sync(&[marker_layer(Category::Investors, 1.0)]);
        surface.swap_style("dark");
        assert_eq!(
            surface.handle.ops,
            vec![
                "add:markers-investors",
                "style:dark",
                "add:markers-investors"
            ]
        );
    }
}
