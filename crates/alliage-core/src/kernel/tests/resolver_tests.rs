use crate::kernel::error::{Error, Result};
use crate::kernel::lifecycle::{LifecycleEvent, LifecyclePhase};
use crate::kernel::resolver::ModuleResolver;
use crate::module_system::ModuleMap;

use super::{recording, Recorder};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_collects_dependencies_before_dependents() -> Result<()> {
    let recorder = Recorder::default();
    let mut modules = ModuleMap::new();
    modules
        .insert("web", recording("web", &[LifecycleEvent::Init, LifecycleEvent::Run], &recorder).with_dependencies(["db", "config"]))?
        .insert("db", recording("db", &[LifecycleEvent::Init], &recorder).with_dependencies(["config"]))?
        .insert("config", recording("config", &[LifecycleEvent::Init, LifecycleEvent::Run], &recorder))?;

    let handlers = ModuleResolver::new(&modules, LifecyclePhase::Run, "test").resolve(&names(&["web"]))?;

    let init: Vec<&str> = handlers.init.iter().map(|(name, _)| name.as_str()).collect();
    let phase: Vec<&str> = handlers.phase.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(init, vec!["config", "db", "web"]);
    assert_eq!(phase, vec!["config", "web"]);
    // Resolution only builds instances; no handler ran
    assert_eq!(recorder.entries(), vec!["config:new", "db:new", "web:new"]);
    Ok(())
}

#[test]
fn test_only_requested_modules_are_loaded() -> Result<()> {
    let recorder = Recorder::default();
    let mut modules = ModuleMap::new();
    modules
        .insert("wanted", recording("wanted", &[LifecycleEvent::Init], &recorder))?
        .insert("ignored", recording("ignored", &[LifecycleEvent::Init], &recorder))?;

    let handlers = ModuleResolver::new(&modules, LifecyclePhase::Install, "test").resolve(&names(&["wanted"]))?;

    assert_eq!(handlers.init.len(), 1);
    assert_eq!(recorder.entries(), vec!["wanted:new"]);
    Ok(())
}

#[test]
fn test_unknown_top_level_name() {
    let modules = ModuleMap::new();
    let result = ModuleResolver::new(&modules, LifecyclePhase::Run, "test").resolve(&names(&["nowhere"]));
    assert!(matches!(result, Err(Error::UnknownModule { ref module }) if module == "nowhere"));
}

#[test]
fn test_repeated_names_are_loaded_once() -> Result<()> {
    let recorder = Recorder::default();
    let mut modules = ModuleMap::new();
    modules.insert("once", recording("once", &[LifecycleEvent::Init], &recorder))?;

    let handlers = ModuleResolver::new(&modules, LifecyclePhase::Build, "test").resolve(&names(&["once", "once"]))?;

    assert_eq!(handlers.init.len(), 1);
    assert_eq!(recorder.entries(), vec!["once:new"]);
    Ok(())
}

#[test]
fn test_debug_lists_module_names() -> Result<()> {
    let recorder = Recorder::default();
    let mut modules = ModuleMap::new();
    modules.insert("solo", recording("solo", &[LifecycleEvent::Init, LifecycleEvent::Build], &recorder))?;

    let handlers = ModuleResolver::new(&modules, LifecyclePhase::Build, "test").resolve(&names(&["solo"]))?;
    assert_eq!(format!("{:?}", handlers), r#"CollectedHandlers { init: ["solo"], phase: ["solo"] }"#);
    Ok(())
}
