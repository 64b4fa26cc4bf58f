use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::function::{wave, FunctionType, SurfaceParams, TransitionMode};
use crate::misc::smooth_step;
use crate::render::{ComputeTarget, FrameParams, PointBuffer};

use super::*;

fn rng() -> StdRng {
    StdRng::seed_from_u64(99)
}

#[derive(Default)]
struct RecordingTarget {
    allocated: Option<usize>,
    released: bool,
    params: Vec<FrameParams<f64>>,
    dispatches: Vec<[usize; 2]>,
}

impl ComputeTarget<f64> for RecordingTarget {
    fn allocate(&mut self, capacity: usize) {
        self.allocated = Some(capacity);
    }

    fn write_frame_params(&mut self, params: &FrameParams<f64>) {
        self.params.push(*params);
    }

    fn dispatch(&mut self, groups: [usize; 2]) {
        self.dispatches.push(groups);
    }

    fn release(&mut self) {
        self.released = true;
    }
}

#[test]
fn test_point_graph_grid_corner_parameters() {
    let mut graph = PointGraph::<f64>::new();
    let mut buffer = PointBuffer::new();
    graph.initialize(&mut buffer).unwrap();
    graph.tick_with(0.0, &mut rng(), &mut buffer);

    // N = 10: index 0 is grid (0, 0) with u = v = -0.9, index 99 is
    // grid (9, 9) with u = v = 0.9; wave passes u and v through to x and z
    let first = buffer.position(graph.slots()[0]);
    assert_relative_eq!(first.x, -0.9, epsilon = 1e-12);
    assert_relative_eq!(first.z, -0.9, epsilon = 1e-12);

    let last = buffer.position(graph.slots()[99]);
    assert_relative_eq!(last.x, 0.9, epsilon = 1e-12);
    assert_relative_eq!(last.z, 0.9, epsilon = 1e-12);
}

#[test]
fn test_point_graph_index_maps_row_major() {
    let mut graph = PointGraph::<f64>::new();
    let mut buffer = PointBuffer::new();
    graph.initialize(&mut buffer).unwrap();
    graph.tick_with(0.0, &mut rng(), &mut buffer);

    // index 13 -> x = 3, z = 1
    let n = graph.resolution();
    let p = buffer.position(graph.slots()[13]);
    let step = 2.0 / n as f64;
    assert_relative_eq!(p.x, (3.0 + 0.5) * step - 1.0, epsilon = 1e-12);
    assert_relative_eq!(p.z, (1.0 + 0.5) * step - 1.0, epsilon = 1e-12);
}

#[test]
fn test_point_graph_steady_matches_direct_evaluation() {
    let mut graph = PointGraph::<f64>::new();
    let mut buffer = PointBuffer::new();
    graph.initialize(&mut buffer).unwrap();
    graph.tick_with(0.25, &mut rng(), &mut buffer);

    let params = SurfaceParams::default();
    let n = graph.resolution();
    let step = 2.0 / n as f64;
    for i in 0..graph.point_count() {
        let (x, z) = (i % n, i / n);
        let u = (x as f64 + 0.5) * step - 1.0;
        let v = (z as f64 + 0.5) * step - 1.0;
        let expected = wave(u, v, 0.25, &params);
        assert_relative_eq!(*buffer.position(graph.slots()[i]), expected, epsilon = 1e-12);
    }
}

#[test]
fn test_point_graph_uniform_scale_follows_size() {
    let mut graph = PointGraph::<f64>::new();
    let mut buffer = PointBuffer::new();
    graph.initialize(&mut buffer).unwrap();

    graph.tick_with(0.0, &mut rng(), &mut buffer);
    let scale = buffer.scale(graph.slots()[0]);
    assert_relative_eq!(scale.x, 0.2, epsilon = 1e-12);
    assert_relative_eq!(scale.y, 0.2, epsilon = 1e-12);
    assert_relative_eq!(scale.z, 0.2, epsilon = 1e-12);

    graph.set_size(2.0);
    graph.tick_with(0.0, &mut rng(), &mut buffer);
    assert_relative_eq!(buffer.scale(graph.slots()[0]).x, 0.4, epsilon = 1e-12);
}

#[test]
fn test_point_graph_transition_starts_at_previous_function() {
    let mut rng = rng();
    let mut graph = PointGraph::<f64>::new();
    let mut buffer = PointBuffer::new();
    graph.initialize(&mut buffer).unwrap();

    // one full function duration: the tick flips to transitioning with
    // zero progress, so the frame still shows the previous function
    let changed = graph.tick_with(1.0, &mut rng, &mut buffer);
    assert_eq!(changed, Some(FunctionType::MultiWave));

    let params = SurfaceParams::default();
    let p = *buffer.position(graph.slots()[0]);
    let expected = wave(-0.9, -0.9, 1.0, &params);
    assert_relative_eq!(p, expected, epsilon = 1e-12);
}

#[test]
fn test_point_graph_resolution_is_clamped_and_releases_points() {
    let mut graph = PointGraph::<f64>::new();
    let mut buffer = PointBuffer::new();
    graph.initialize(&mut buffer).unwrap();

    graph.set_resolution(5);
    assert_eq!(graph.resolution(), PointGraph::<f64>::MIN_RESOLUTION);

    graph.set_resolution(100);
    assert_eq!(graph.resolution(), PointGraph::<f64>::MAX_RESOLUTION);
    assert_eq!(graph.point_count(), 70 * 70);
    assert_eq!(graph.slots().len(), 70 * 70);

    graph.set_resolution(20);
    assert_eq!(graph.slots().len(), 400);
    graph.tick_with(0.1, &mut rng(), &mut buffer);
}

#[test]
fn test_point_graph_set_function_is_silent() {
    let mut rng = rng();
    let mut graph = PointGraph::<f64>::new();
    let mut buffer = PointBuffer::new();
    graph.initialize(&mut buffer).unwrap();

    graph.set_function(FunctionType::Sphere);
    assert_eq!(graph.function(), FunctionType::Sphere);
    // well inside the steady window, so no change is reported
    assert_eq!(graph.tick_with(0.1, &mut rng, &mut buffer), None);
}

#[test]
fn test_point_graph_without_transitions_never_reports_changes() {
    let mut rng = rng();
    let mut graph = PointGraph::<f64>::new();
    let mut buffer = PointBuffer::new();
    graph.initialize(&mut buffer).unwrap();

    graph.set_function(FunctionType::Torus);
    graph.set_transitions_enabled(false).unwrap();
    for _ in 0..20 {
        assert_eq!(graph.tick_with(0.5, &mut rng, &mut buffer), None);
    }
    assert_eq!(graph.function(), FunctionType::Torus);
}

#[test]
fn test_point_graph_lifecycle_allocates_and_releases_target() {
    let mut graph = PointGraph::<f64>::new();
    let mut buffer = PointBuffer::new();

    graph.initialize(&mut buffer).unwrap();
    assert_eq!(buffer.len(), 70 * 70);

    graph.shutdown(&mut buffer);
    assert!(buffer.is_empty());
}

#[test]
fn test_point_graph_random_mode_reports_valid_switches() {
    let mut rng = rng();
    let mut graph = PointGraph::<f64>::new();
    let mut buffer = PointBuffer::new();
    graph.initialize(&mut buffer).unwrap();
    graph.set_transition_mode(TransitionMode::Random);

    let mut switches = 0;
    let mut previous = graph.function();
    for _ in 0..40 {
        if let Some(function) = graph.tick_with(0.5, &mut rng, &mut buffer) {
            assert_ne!(function, previous);
            previous = function;
            switches += 1;
        }
    }
    assert!(switches > 0);
}

#[test]
fn test_dispatch_graph_default_frame_params() {
    let graph = DispatchGraph::<f64>::new();
    let params = graph.frame_params();
    assert_eq!(params.resolution, 10);
    assert_relative_eq!(params.step, 0.2, epsilon = 1e-12);
    assert_relative_eq!(params.time, 0.0);
    assert_relative_eq!(params.transition_progress, 0.0);
    assert!(params.kernel.is_steady());
    assert_eq!(params.kernel.target(), FunctionType::Wave);
    assert_eq!(params.kernel.index(), 0);
    assert_relative_eq!(params.bounds_extent, 2.2, epsilon = 1e-12);
}

#[test]
fn test_dispatch_graph_covers_grid_with_work_groups() {
    let mut rng = rng();
    let mut graph = DispatchGraph::<f64>::new();
    let mut target = RecordingTarget::default();
    graph.initialize(&mut target);

    graph.tick_with(0.1, &mut rng, &mut target);
    assert_eq!(target.dispatches, vec![[2, 2]]);

    graph.set_resolution(700);
    graph.tick_with(0.1, &mut rng, &mut target);
    // 700 / 8 rounds up to 88 groups per axis
    assert_eq!(target.dispatches[1], [88, 88]);
}

#[test]
fn test_dispatch_graph_resolution_is_clamped() {
    let mut graph = DispatchGraph::<f64>::new();
    graph.set_resolution(5);
    assert_eq!(graph.resolution(), 10);
    graph.set_resolution(1000);
    assert_eq!(graph.resolution(), 700);
}

#[test]
fn test_dispatch_graph_allocates_full_capacity_once() {
    let mut graph = DispatchGraph::<f64>::new();
    let mut target = RecordingTarget::default();
    graph.initialize(&mut target);
    assert_eq!(target.allocated, Some(700 * 700));

    graph.shutdown(&mut target);
    assert!(target.released);
}

#[test]
fn test_dispatch_graph_emits_eased_progress_while_transitioning() {
    let mut rng = rng();
    let mut graph = DispatchGraph::<f64>::new();
    let mut target = RecordingTarget::default();
    graph.initialize(&mut target);
    graph.set_transitions_enabled(true).unwrap();

    // end of the steady second: transition starts at zero progress
    let changed = graph.tick_with(1.0, &mut rng, &mut target);
    assert_eq!(changed, Some(FunctionType::MultiWave));
    let start = target.params.last().unwrap();
    assert_relative_eq!(start.transition_progress, 0.0);
    assert_eq!(start.kernel.source(), FunctionType::Wave);
    assert_eq!(start.kernel.target(), FunctionType::MultiWave);
    assert_eq!(
        start.kernel.index(),
        FunctionType::MultiWave.index() + FunctionType::Wave.index() * FunctionType::COUNT
    );

    // halfway through the transition the progress is eased
    graph.tick_with(0.25, &mut rng, &mut target);
    let mid = target.params.last().unwrap();
    assert_relative_eq!(mid.transition_progress, smooth_step(0.25), epsilon = 1e-12);

    // transition over: back to a steady identity pair
    graph.tick_with(0.75, &mut rng, &mut target);
    let end = target.params.last().unwrap();
    assert!(end.kernel.is_steady());
    assert_relative_eq!(end.transition_progress, 0.0);
}

#[test]
fn test_graph_trait_objects_share_the_configuration_surface() {
    let mut cpu = PointGraph::<f64>::new();
    let mut gpu = DispatchGraph::<f64>::new();
    let graphs: Vec<&mut dyn Graph<f64>> = vec![&mut cpu, &mut gpu];
    for graph in graphs {
        graph.set_function(FunctionType::Ripple);
        graph.set_transition_mode(TransitionMode::Random);
        graph.set_function_duration(2.0).unwrap();
        assert_eq!(graph.function(), FunctionType::Ripple);
        assert_eq!(graph.transition_mode(), TransitionMode::Random);
        assert_relative_eq!(graph.function_duration(), 2.0);
        let (min, _) = graph.resolution_bounds();
        assert_eq!(min, 10);
    }
}
