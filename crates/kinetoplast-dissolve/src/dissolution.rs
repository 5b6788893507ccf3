//! The dissolution state machine.

use kinetoplast_graph::{NetworkTemplate, NodeId};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{info, trace, warn};

use crate::events::{BoundaryEvent, ComponentSnapshot, DissolutionStep};
use crate::policy::{RemovalPolicy, UniformRemoval};
use crate::registry::BoundaryRegistry;
use crate::{Error, Result};

/// Parameters of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DissolutionConfig {
    /// Nodes removed per step.
    pub batch_size: usize,
    /// The run stops once no component is larger than this.
    pub size_threshold: usize,
    /// Report boundary breaks.
    pub track_boundary: bool,
    /// Seed for uniform removal.
    pub seed: u64,
}

impl Default for DissolutionConfig {
    fn default() -> Self {
        Self {
            batch_size: 1,
            size_threshold: 1,
            track_boundary: false,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running,
    Terminated,
}

/// One run over a shared template.
///
/// The template is never touched; removals live in a per-run overlay.
/// Iterating yields one [`DissolutionStep`] per snapshot, ending after the
/// first step whose largest component is within the size threshold.
pub struct Dissolution<'a, P = UniformRemoval<StdRng>> {
    template: &'a NetworkTemplate,
    config: DissolutionConfig,
    policy: P,
    alive: Vec<bool>,
    /// Live node ids in arbitrary order.
    live: Vec<NodeId>,
    /// Position of each node in `live`.
    slots: Vec<usize>,
    registry: BoundaryRegistry,
    removed_last: Vec<NodeId>,
    dissolutions: usize,
    state: State,
    first_break: bool,
    second_break: bool,
}

impl<'a> Dissolution<'a> {
    /// Run with uniform random removal seeded from `config.seed`.
    pub fn new(template: &'a NetworkTemplate, config: DissolutionConfig) -> Result<Self> {
        let policy = UniformRemoval::new(StdRng::seed_from_u64(config.seed));
        Self::with_policy(template, config, policy)
    }
}

impl<'a, P: RemovalPolicy> Dissolution<'a, P> {
    /// Run with a caller-supplied removal order.
    pub fn with_policy(
        template: &'a NetworkTemplate,
        config: DissolutionConfig,
        policy: P,
    ) -> Result<Self> {
        if config.batch_size == 0 {
            return Err(Error::ZeroBatch);
        }
        let nodes = template.len();
        Ok(Self {
            template,
            config,
            policy,
            alive: vec![true; nodes],
            live: template.graph().nodes().collect(),
            slots: (0..nodes).collect(),
            registry: BoundaryRegistry::new(template.boundary_saturation()),
            removed_last: Vec::new(),
            dissolutions: 0,
            state: State::Running,
            first_break: false,
            second_break: false,
        })
    }

    pub fn config(&self) -> &DissolutionConfig {
        &self.config
    }

    /// Nodes removed so far.
    pub fn dissolutions(&self) -> usize {
        self.dissolutions
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn is_live(&self, node: NodeId) -> bool {
        self.alive.get(node.as_usize()).copied().unwrap_or(false)
    }

    pub fn is_terminated(&self) -> bool {
        self.state == State::Terminated
    }

    /// Drive the run to termination.
    pub fn run(self) -> Vec<DissolutionStep> {
        let nodes = self.template.len();
        let steps: Vec<_> = self.collect();
        if let Some(last) = steps.last() {
            info!(
                "Dissolution finished after {} steps: {}/{} nodes removed, largest component {}",
                steps.len(),
                last.dissolutions,
                nodes,
                last.snapshot.largest()
            );
        }
        steps
    }

    fn remove(&mut self, node: NodeId) -> bool {
        if !self.is_live(node) {
            return false;
        }
        let slot = self.slots[node.as_usize()];
        self.live.swap_remove(slot);
        if let Some(&moved) = self.live.get(slot) {
            self.slots[moved.as_usize()] = slot;
        }
        self.alive[node.as_usize()] = false;
        true
    }

    /// Settle the previous batch against the registry.
    fn boundary_event(&mut self) -> Option<BoundaryEvent> {
        let removed = std::mem::take(&mut self.removed_last);
        if !self.config.track_boundary {
            return None;
        }
        let mut emptied = false;
        for node in removed {
            if let Some(cell) = self.template.boundary_cell(node) {
                emptied |= self.registry.record_removal(cell);
            }
        }
        if !emptied {
            return None;
        }
        if !self.first_break {
            self.first_break = true;
            info!("Boundary breaks after {} dissolutions", self.dissolutions);
            Some(BoundaryEvent::FirstBreak)
        } else if !self.second_break {
            self.second_break = true;
            info!(
                "Boundary splits in two after {} dissolutions",
                self.dissolutions
            );
            Some(BoundaryEvent::SecondBreak)
        } else {
            None
        }
    }
}

impl<P: RemovalPolicy> Iterator for Dissolution<'_, P> {
    type Item = DissolutionStep;

    fn next(&mut self) -> Option<DissolutionStep> {
        if self.state == State::Terminated {
            return None;
        }

        let snapshot = ComponentSnapshot::of(self.template.graph(), &self.alive);
        let event = self.boundary_event();
        let largest = snapshot.largest();
        trace!(
            "Step at {} dissolutions: {} live, {} components, largest {}",
            self.dissolutions,
            self.live.len(),
            snapshot.component_count(),
            largest
        );
        let step = DissolutionStep {
            dissolutions: self.dissolutions,
            snapshot,
            event,
        };

        if largest <= self.config.size_threshold {
            self.state = State::Terminated;
            return Some(step);
        }

        let count = self.config.batch_size.min(self.live.len());
        let batch = self.policy.choose(&self.live, count);
        let mut removed = Vec::with_capacity(batch.len());
        for node in batch {
            if self.remove(node) {
                removed.push(node);
            }
        }
        if removed.is_empty() {
            warn!(
                "Removal policy produced no live nodes with {} still live; stopping",
                self.live.len()
            );
            self.state = State::Terminated;
        }
        self.dissolutions += removed.len();
        self.removed_last = removed;
        Some(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::ScriptedRemoval;
    use kinetoplast_graph::{compile, CompileOptions};
    use kinetoplast_lattice::{CellCoord, Dims, Lattice, LatticeConfig, SaturationMode, Topology};

    fn rectangular(columns: usize, rows: usize, extra: u32) -> NetworkTemplate {
        let config = LatticeConfig {
            topology: Topology::Rectangular,
            dims: Dims::planar(columns, rows),
            flag_boundary: extra > 0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(7);
        let mut lattice = Lattice::build(config, &mut rng).unwrap();
        if extra > 0 {
            lattice
                .super_saturate_boundary(extra, SaturationMode::Stacked, &mut rng)
                .unwrap();
        }
        compile(lattice, &CompileOptions::default(), &mut rng).unwrap()
    }

    /// Boustrophedon order over a single-point-per-cell grid.
    fn snake(template: &NetworkTemplate, columns: usize, rows: usize) -> Vec<NodeId> {
        (0..rows)
            .flat_map(|y| {
                let xs: Vec<usize> = if y % 2 == 0 {
                    (0..columns).collect()
                } else {
                    (0..columns).rev().collect()
                };
                xs.into_iter().map(move |x| CellCoord::planar(x, y))
            })
            .filter_map(|coord| template.index().node(coord, 0))
            .collect()
    }

    #[test]
    fn rejects_zero_batch() {
        let template = rectangular(3, 3, 0);
        let config = DissolutionConfig {
            batch_size: 0,
            ..Default::default()
        };
        assert_eq!(Dissolution::new(&template, config).err(), Some(Error::ZeroBatch));
    }

    #[test]
    fn snake_removal_keeps_one_component() {
        let template = rectangular(4, 4, 0);
        let order = snake(&template, 4, 4);
        let steps = Dissolution::with_policy(
            &template,
            DissolutionConfig::default(),
            ScriptedRemoval::new(order),
        )
        .unwrap()
        .run();

        assert_eq!(steps[0].snapshot.components, vec![(16, 1)]);
        assert_eq!(steps.len(), 16);
        for (i, step) in steps.iter().enumerate() {
            assert_eq!(step.dissolutions, i);
            assert_eq!(step.snapshot.components, vec![(16 - i, 1)]);
        }
        let last = steps.last().unwrap();
        assert_eq!(last.dissolutions, 15);
        assert!(last.snapshot.largest() <= 1);
    }

    #[test]
    fn random_removal_terminates() {
        let template = rectangular(4, 4, 0);
        for seed in 0..20 {
            let config = DissolutionConfig {
                seed,
                ..Default::default()
            };
            let steps = Dissolution::new(&template, config).unwrap().run();
            assert_eq!(steps[0].snapshot.components, vec![(16, 1)]);
            assert!((9..=16).contains(&steps.len()), "{} steps", steps.len());
            assert!(steps.last().unwrap().snapshot.largest() <= 1);
            for (step, next) in steps.iter().zip(&steps[1..]) {
                assert_eq!(next.dissolutions, step.dissolutions + 1);
                assert_eq!(
                    next.snapshot.live_nodes(),
                    16 - next.dissolutions
                );
            }
        }
    }

    #[test]
    fn same_seed_same_run() {
        let template = rectangular(5, 5, 0);
        let config = DissolutionConfig {
            batch_size: 2,
            seed: 99,
            ..Default::default()
        };
        let a = Dissolution::new(&template, config).unwrap().run();
        let b = Dissolution::new(&template, config).unwrap().run();
        assert_eq!(a, b);
    }

    #[test]
    fn oversized_batch_removes_everything() {
        let template = rectangular(3, 3, 0);
        let config = DissolutionConfig {
            batch_size: 100,
            size_threshold: 0,
            ..Default::default()
        };
        let steps = Dissolution::new(&template, config).unwrap().run();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[1].dissolutions, 9);
        assert!(steps[1].snapshot.is_empty());
    }

    /// A template with cells but no points, which no lattice build produces.
    fn empty_template() -> NetworkTemplate {
        let mut value = serde_json::to_value(rectangular(2, 2, 0)).unwrap();
        let cells = value["lattice"]["cells"].as_array().unwrap().len();
        value["lattice"]["points"] = serde_json::json!([]);
        value["lattice"]["cells"] = serde_json::json!(vec![Vec::<u32>::new(); cells]);
        value["index"]["offsets"] = serde_json::json!(vec![0u32; cells + 1]);
        value["index"]["points"] = serde_json::json!([]);
        value["graph"]["adjacency"] = serde_json::json!([]);
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn empty_graph_emits_one_empty_step() {
        let template = empty_template();
        assert!(template.is_empty());
        let steps = Dissolution::new(&template, DissolutionConfig::default())
            .unwrap()
            .run();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].dissolutions, 0);
        assert!(steps[0].snapshot.is_empty());
        assert_eq!(steps[0].event, None);
    }

    #[test]
    fn threshold_already_met() {
        let template = rectangular(3, 3, 0);
        let config = DissolutionConfig {
            size_threshold: 9,
            ..Default::default()
        };
        let steps = Dissolution::new(&template, config).unwrap().run();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].dissolutions, 0);
    }

    #[test]
    fn boundary_breaks_in_order() {
        // 3 x 3 with every ring cell doubled.
        let template = rectangular(3, 3, 1);
        assert_eq!(template.boundary_saturation(), 2);
        let index = template.index();
        let corner = CellCoord::planar(0, 0);
        let far = CellCoord::planar(2, 2);
        let order = vec![
            index.node(corner, 0).unwrap(),
            index.node(far, 0).unwrap(),
            index.node(corner, 1).unwrap(),
            index.node(CellCoord::planar(1, 1), 0).unwrap(),
            index.node(far, 1).unwrap(),
            index.node(CellCoord::planar(1, 0), 0).unwrap(),
            index.node(CellCoord::planar(1, 0), 1).unwrap(),
        ];
        let config = DissolutionConfig {
            size_threshold: 0,
            track_boundary: true,
            ..Default::default()
        };
        let mut run =
            Dissolution::with_policy(&template, config, ScriptedRemoval::new(order)).unwrap();
        let steps: Vec<_> = run.by_ref().collect();
        assert!(run.is_terminated());

        let events: Vec<_> = steps
            .iter()
            .enumerate()
            .filter_map(|(i, step)| step.event.map(|event| (i, event)))
            .collect();
        // The corner empties with the third removal, the far corner with the fifth.
        assert_eq!(
            events,
            vec![(3, BoundaryEvent::FirstBreak), (5, BoundaryEvent::SecondBreak)]
        );
    }

    #[test]
    fn untracked_runs_report_nothing() {
        let template = rectangular(3, 3, 1);
        let config = DissolutionConfig {
            size_threshold: 0,
            ..Default::default()
        };
        let steps = Dissolution::new(&template, config).unwrap().run();
        assert!(steps.iter().all(|step| step.event.is_none()));
        assert_eq!(steps.last().unwrap().dissolutions, template.len());
    }

    #[test]
    fn overlay_tracks_live_nodes() {
        let template = rectangular(3, 3, 0);
        let mut run = Dissolution::with_policy(
            &template,
            DissolutionConfig::default(),
            ScriptedRemoval::new([NodeId(4), NodeId(0)]),
        )
        .unwrap();
        run.next();
        assert!(!run.is_live(NodeId(4)));
        assert!(run.is_live(NodeId(0)));
        assert_eq!(run.live_count(), 8);
        assert_eq!(run.dissolutions(), 1);
    }
}
