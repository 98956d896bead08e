use ambience_core::*;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

type Engine = ToneEngine<OfflineGraph>;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn engine_with(store: MemoryStore, clock: ManualClock) -> Engine {
    ToneEngine::new(
        ToneConfig::default(),
        || Ok(OfflineGraph::new()),
        clock,
        store,
    )
}

fn engine() -> Engine {
    engine_with(MemoryStore::new(), ManualClock::new())
}

fn graph(engine: &Engine) -> &OfflineGraph {
    engine.backend().expect("engine should be active")
}

fn advance(engine: &mut Engine, dt: f64) {
    engine.backend_mut().expect("engine should be active").advance(dt);
}

fn bus_now(engine: &Engine, bus: Bus) -> f32 {
    let id = *engine.bus(bus).unwrap();
    let g = graph(engine);
    g.bus_value_at(id, g.current_time())
}

fn effects_voices(engine: &Engine) -> usize {
    let id = *engine.bus(Bus::Effects).unwrap();
    graph(engine).voices_on(id).len()
}

#[test]
fn activation_builds_two_buses_at_configured_volume() {
    let mut e = engine();
    assert!(!e.is_active());
    e.activate();
    assert!(e.is_active());
    assert_eq!(graph(&e).bus_count(), 2);
    assert!(close(bus_now(&e, Bus::Ambient), 0.08));
    assert!(close(bus_now(&e, Bus::Effects), 0.15));
}

#[test]
fn activation_is_idempotent() {
    let opened = Rc::new(Cell::new(0));
    let counter = opened.clone();
    let mut e: Engine = ToneEngine::new(
        ToneConfig::default(),
        move || {
            counter.set(counter.get() + 1);
            Ok(OfflineGraph::new())
        },
        ManualClock::new(),
        MemoryStore::new(),
    );
    e.activate();
    e.activate();
    assert_eq!(opened.get(), 1);
    assert_eq!(graph(&e).bus_count(), 2);
}

#[test]
fn muted_preference_silences_buses_from_the_start() {
    let mut store = MemoryStore::new();
    store.save_muted(true);
    let mut e = engine_with(store, ManualClock::new());
    assert!(e.is_muted());
    e.activate();
    assert!(close(bus_now(&e, Bus::Ambient), 0.0));
    assert!(close(bus_now(&e, Bus::Effects), 0.0));

    e.start_ambient_drone();
    e.play_click();
    e.play_transition();
    assert!(!e.is_ambient_playing());
    assert_eq!(graph(&e).running_generators(), 0);
    assert!(graph(&e).generators().is_empty());
}

#[test]
fn calls_before_activation_are_ignored() {
    let mut e = engine();
    e.start_ambient_drone();
    e.play_click();
    e.play_hover();
    e.play_transition();
    e.stop_ambient_drone();
    assert!(e.backend().is_none());
    assert!(!e.is_ambient_playing());
}

#[test]
fn drone_starts_four_generators_and_fades_in() {
    let mut e = engine();
    e.activate();
    advance(&mut e, 5.0);
    e.start_ambient_drone();
    assert!(e.is_ambient_playing());

    let g = graph(&e);
    assert_eq!(g.running_generators(), 4);
    let ambient = *e.bus(Bus::Ambient).unwrap();
    assert!(close(g.bus_value_at(ambient, 5.0), 0.0));
    assert!(close(g.bus_value_at(ambient, 6.0), 0.04));
    assert!(close(g.bus_value_at(ambient, 7.0), 0.08));

    let layers = g.voices_on(ambient);
    let freqs: Vec<f32> = layers.iter().map(|v| v.frequency_at(5.0)).collect();
    assert_eq!(freqs, vec![55.0, 82.5, 110.0]);
    let gains: Vec<f32> = layers.iter().map(|v| v.gain_at(5.0)).collect();
    assert!(close(gains[0], 0.30) && close(gains[1], 0.22) && close(gains[2], 0.14));
    assert!(layers.iter().all(|v| v.stop.is_none()));
}

#[test]
fn modulator_drives_only_the_root_layer() {
    let mut e = engine();
    e.activate();
    e.start_ambient_drone();
    let g = graph(&e);
    let all = g.generators();
    let root = all[0].0;
    let lfos: Vec<_> = all
        .iter()
        .filter(|(_, r)| matches!(r.routing, Routing::Frequency { .. }))
        .collect();
    assert_eq!(lfos.len(), 1);
    let (_, lfo) = lfos[0];
    assert_eq!(
        lfo.routing,
        Routing::Frequency {
            target: root,
            depth_hz: 3.0
        }
    );
    assert!(close(lfo.frequency_at(0.0), 0.2));
}

#[test]
fn drone_does_not_double_start() {
    let mut e = engine();
    e.activate();
    e.start_ambient_drone();
    e.start_ambient_drone();
    assert_eq!(graph(&e).generators().len(), 4);
}

#[test]
fn stopping_fades_out_then_halts() {
    let mut e = engine();
    e.activate();
    e.start_ambient_drone();
    advance(&mut e, 3.0);
    e.stop_ambient_drone();

    let ambient = *e.bus(Bus::Ambient).unwrap();
    {
        let g = graph(&e);
        assert!(close(g.bus_value_at(ambient, 3.0), 0.08));
        assert!(close(g.bus_value_at(ambient, 4.0), 0.04));
        assert!(close(g.bus_value_at(ambient, 5.0), 0.0));
        assert!(g
            .generators()
            .iter()
            .all(|(_, r)| r.stop.map_or(false, |s| (s - 5.0).abs() < 1e-9)));
        assert_eq!(g.running_generators(), 4);
    }
    // still fading: counts as playing, so a restart is ignored
    assert!(e.is_ambient_playing());
    e.start_ambient_drone();
    assert_eq!(graph(&e).generators().len(), 4);

    advance(&mut e, 2.0);
    assert!(!e.is_ambient_playing());
    assert_eq!(graph(&e).running_generators(), 0);
    assert_eq!(e.backend_mut().unwrap().prune(), 4);

    e.start_ambient_drone();
    assert_eq!(graph(&e).running_generators(), 4);
}

#[test]
fn stop_without_drone_is_a_no_op() {
    let mut e = engine();
    e.activate();
    e.stop_ambient_drone();
    let ambient = *e.bus(Bus::Ambient).unwrap();
    assert!(graph(&e).bus_automation(ambient).is_empty());
}

#[test]
fn hover_is_rate_limited_on_the_wall_clock() {
    let clock = ManualClock::new();
    let mut e = engine_with(MemoryStore::new(), clock.clone());
    e.activate();

    e.play_hover();
    clock.advance(Duration::from_millis(50));
    e.play_hover();
    assert_eq!(effects_voices(&e), 1);

    clock.advance(Duration::from_millis(50));
    e.play_hover();
    assert_eq!(effects_voices(&e), 2);
}

#[test]
fn hover_tick_shape() {
    let mut e = engine();
    e.activate();
    advance(&mut e, 1.0);
    e.play_hover();
    let effects = *e.bus(Bus::Effects).unwrap();
    let g = graph(&e);
    let voice = g.voices_on(effects)[0];
    assert_eq!(voice.waveform, Waveform::Triangle);
    assert!(close(voice.frequency_at(1.0), 1200.0));
    assert!(close(voice.gain_at(1.0), 0.4));
    assert!(close(voice.gain_at(1.08), EXP_RAMP_FLOOR));
    assert!((voice.stop.unwrap() - 1.08).abs() < 1e-9);
}

#[test]
fn click_chime_is_staggered() {
    let mut e = engine();
    e.activate();
    let t = 2.5;
    advance(&mut e, t);
    e.play_click();

    let effects = *e.bus(Bus::Effects).unwrap();
    let g = graph(&e);
    let voices = g.voices_on(effects);
    assert_eq!(voices.len(), 3);
    for (i, (voice, hz)) in voices.iter().zip([800.0, 1000.0, 1200.0]).enumerate() {
        let start = t + 0.04 * i as f64;
        let end = start + 0.12;
        assert!((voice.start - start).abs() < 1e-9);
        assert!((voice.stop.unwrap() - end).abs() < 1e-9);
        assert_eq!(voice.waveform, Waveform::Sine);
        assert!(close(voice.frequency_at(start), hz));
        assert!(close(voice.gain_at(start), 0.3));
        assert!(close(voice.gain_at(end), EXP_RAMP_FLOOR));
        assert!(voice
            .gain
            .iter()
            .any(|a| matches!(a, Automation::ExponentialRamp { end: ramp_end, .. } if (ramp_end - end).abs() < 1e-9)));
    }
}

#[test]
fn transition_sweeps_down_with_soft_attack() {
    let mut e = engine();
    e.activate();
    e.play_transition();
    let effects = *e.bus(Bus::Effects).unwrap();
    let g = graph(&e);
    let voice = g.voices_on(effects)[0];
    assert!(close(voice.frequency_at(0.0), 1000.0));
    assert!(close(voice.frequency_at(0.2), 200.0));
    assert!(voice.frequency_at(0.1) < 1000.0 && voice.frequency_at(0.1) > 200.0);
    assert!(close(voice.gain_at(0.0), 0.0));
    assert!(close(voice.gain_at(0.03), 0.2));
    assert!(close(voice.gain_at(0.2), EXP_RAMP_FLOOR));
    assert!((voice.stop.unwrap() - 0.2).abs() < 1e-9);
}

#[test]
fn mute_keeps_drone_running_and_ramps_to_silence() {
    let mut e = engine();
    e.activate();
    e.start_ambient_drone();
    advance(&mut e, 3.0);

    assert!(e.toggle_mute());
    let ambient = *e.bus(Bus::Ambient).unwrap();
    let effects = *e.bus(Bus::Effects).unwrap();
    {
        let g = graph(&e);
        assert!(close(g.bus_value_at(ambient, 3.15), 0.04));
        assert!(close(g.bus_value_at(ambient, 3.3), 0.0));
        assert!(close(g.bus_value_at(effects, 3.3), 0.0));
    }
    advance(&mut e, 1.0);
    assert_eq!(graph(&e).running_generators(), 4);
    assert!(e.is_ambient_playing());

    e.play_click();
    assert_eq!(effects_voices(&e), 0);
}

#[test]
fn toggling_twice_restores_state_and_levels() {
    let store = MemoryStore::new();
    let mut e = engine_with(store.clone(), ManualClock::new());
    e.activate();
    e.start_ambient_drone();
    advance(&mut e, 3.0);

    assert!(e.toggle_mute());
    assert_eq!(store.get(MUTED_KEY).as_deref(), Some("true"));
    advance(&mut e, 1.0);
    assert!(!e.toggle_mute());
    assert_eq!(store.get(MUTED_KEY).as_deref(), Some("false"));
    advance(&mut e, 1.0);

    assert!(!e.is_muted());
    assert!(close(bus_now(&e, Bus::Ambient), 0.08));
    assert!(close(bus_now(&e, Bus::Effects), 0.15));
    // drone was playing throughout, so nothing new was started
    assert_eq!(graph(&e).generators().len(), 4);
    assert_eq!(graph(&e).running_generators(), 4);
}

#[test]
fn unmuting_restarts_a_stopped_drone() {
    let mut store = MemoryStore::new();
    store.save_muted(true);
    let mut e = engine_with(store, ManualClock::new());
    e.activate();
    e.start_ambient_drone();
    assert!(!e.is_ambient_playing());

    assert!(!e.toggle_mute());
    assert!(e.is_ambient_playing());
    assert_eq!(graph(&e).running_generators(), 4);
    advance(&mut e, 2.0);
    assert!(close(bus_now(&e, Bus::Ambient), 0.08));
    assert!(close(bus_now(&e, Bus::Effects), 0.15));
}

#[test]
fn unavailable_audio_leaves_engine_inert() {
    let store = MemoryStore::new();
    let mut e: Engine = ToneEngine::new(
        ToneConfig::default(),
        || Err(AudioError::Unsupported("no AudioContext".into())),
        ManualClock::new(),
        store.clone(),
    );
    e.activate();
    assert!(e.is_inert());
    e.activate();
    e.start_ambient_drone();
    e.play_hover();
    e.play_click();
    e.play_transition();
    e.stop_ambient_drone();
    assert!(e.backend().is_none());
    assert!(!e.is_ambient_playing());

    // the preference still flips and persists
    assert!(e.toggle_mute());
    assert_eq!(store.get(MUTED_KEY).as_deref(), Some("true"));
}

#[test]
fn toggle_before_activation_only_touches_the_flag() {
    let mut e = engine();
    assert!(e.toggle_mute());
    e.activate();
    assert!(close(bus_now(&e, Bus::Ambient), 0.0));
    assert!(!e.toggle_mute());
    assert_eq!(graph(&e).running_generators(), 4);
}

#[test]
fn custom_volumes_are_used() {
    let config = ToneConfig {
        ambient_volume: 0.5,
        effects_volume: 0.25,
        ..Default::default()
    };
    let mut e: Engine = ToneEngine::new(
        config,
        || Ok(OfflineGraph::new()),
        ManualClock::new(),
        MemoryStore::new(),
    );
    assert_eq!(e.config().ambient_volume, 0.5);
    assert_eq!(e.config().hover_interval, Duration::from_millis(100));
    e.activate();
    assert!(close(bus_now(&e, Bus::Effects), 0.25));
    e.start_ambient_drone();
    advance(&mut e, 2.0);
    assert!(close(bus_now(&e, Bus::Ambient), 0.5));
}

#[test]
fn first_gesture_click_chimes() {
    // a page gesture activates the engine before the element's own handler runs
    let mut e = engine();
    e.activate();
    e.start_ambient_drone();
    e.play_click();
    assert_eq!(effects_voices(&e), 3);
}

#[test]
fn voices_start_at_the_current_audio_time() {
    let mut e = engine();
    e.activate();
    e.backend_mut().unwrap().set_time(5.0);
    e.play_transition();
    let g = graph(&e);
    let ids: Vec<GeneratorId> = g.generators().into_iter().map(|(id, _)| id).collect();
    assert_eq!(ids.len(), 1);
    let record = g.generator(ids[0]).unwrap();
    assert_eq!(record.start, 5.0);
    assert!(close(record.frequency_at(5.0), TRANSITION_FROM_HZ));
    assert!(record.is_running_at(5.1));
    assert!(!record.is_running_at(5.0 + TRANSITION_DURATION_SEC));
}
