#[cfg(test)]
mod resolver_tests;

use std::sync::{Arc, Mutex};

use crate::kernel::lifecycle::{sync_init_handler, sync_phase_handler, LifecycleEvent, LifecycleHandlers, LifecyclePhase};
use crate::module_system::{Module, ModuleDescriptor};

/// Shared log of everything the test modules did, in call order
#[derive(Clone, Default)]
pub(crate) struct Recorder(Arc<Mutex<Vec<String>>>);

impl Recorder {
    pub(crate) fn record(&self, entry: String) {
        self.0.lock().unwrap().push(entry);
    }

    pub(crate) fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    /// Entries ending with `suffix`, e.g. ":new" or ":run"
    pub(crate) fn entries_ending_with(&self, suffix: &str) -> Vec<String> {
        self.entries().into_iter().filter(|e| e.ends_with(suffix)).collect()
    }

    /// Entries containing `pattern`
    pub(crate) fn entries_containing(&self, pattern: &str) -> Vec<String> {
        self.entries().into_iter().filter(|e| e.contains(pattern)).collect()
    }
}

/// Module recording its instantiation and every handler call.
///
/// Entries look like `a:new`, `a:init:RUN:test` and `a:run`.
struct RecordingModule {
    name: String,
    events: Vec<LifecycleEvent>,
    recorder: Recorder,
}

impl Module for RecordingModule {
    fn lifecycle_handlers(&self) -> LifecycleHandlers {
        let mut handlers = LifecycleHandlers::new();
        for event in &self.events {
            let name = self.name.clone();
            let recorder = self.recorder.clone();
            let phase = match event {
                LifecycleEvent::Init => {
                    handlers = handlers.on_init(sync_init_handler(move |_args, env, _container, context| {
                        recorder.record(format!("{}:init:{}:{}", name, context, env));
                        Ok(())
                    }));
                    continue;
                }
                LifecycleEvent::Install => LifecyclePhase::Install,
                LifecycleEvent::Build => LifecyclePhase::Build,
                LifecycleEvent::Run => LifecyclePhase::Run,
            };
            handlers = handlers.on_phase(
                phase,
                sync_phase_handler(move |_args, _env, _container| {
                    recorder.record(format!("{}:{}", name, phase));
                    Ok(())
                }),
            );
        }
        handlers
    }
}

/// Descriptor for a recording module handling `events`
pub(crate) fn recording(name: &str, events: &[LifecycleEvent], recorder: &Recorder) -> ModuleDescriptor {
    let name = name.to_string();
    let events = events.to_vec();
    let recorder = recorder.clone();
    ModuleDescriptor::from_fn(move || {
        recorder.record(format!("{}:new", name));
        Box::new(RecordingModule {
            name: name.clone(),
            events: events.clone(),
            recorder: recorder.clone(),
        })
    })
}

/// Every lifecycle event
pub(crate) const ALL_EVENTS: [LifecycleEvent; 4] = [
    LifecycleEvent::Init,
    LifecycleEvent::Install,
    LifecycleEvent::Build,
    LifecycleEvent::Run,
];
