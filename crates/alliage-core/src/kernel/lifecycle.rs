use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::container::PrimitiveContainer;
use crate::kernel::error::Result;
use crate::utils::arguments::Arguments;

// This type represents an owned future returned by every lifecycle handler
pub type BoxFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

/// Handler for the `init` event, which also receives the phase that triggered it
pub type InitHandler = Box<
    dyn for<'a> Fn(&'a Arguments, &'a str, &'a mut PrimitiveContainer, InitializationContext) -> BoxFuture<'a>
        + Send
        + Sync,
>;

/// Handler for one of the `install`, `build` or `run` events
pub type PhaseHandler =
    Box<dyn for<'a> Fn(&'a Arguments, &'a str, &'a mut PrimitiveContainer) -> BoxFuture<'a> + Send + Sync>;

/// Named hook points a module can react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    Init,
    Install,
    Build,
    Run,
}

impl LifecycleEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleEvent::Init => "init",
            LifecycleEvent::Install => "install",
            LifecycleEvent::Build => "build",
            LifecycleEvent::Run => "run",
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level operation requested of the kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecyclePhase {
    Install,
    Build,
    Run,
}

impl LifecyclePhase {
    /// The event fired after `init` for this phase
    pub fn event(&self) -> LifecycleEvent {
        match self {
            LifecyclePhase::Install => LifecycleEvent::Install,
            LifecyclePhase::Build => LifecycleEvent::Build,
            LifecyclePhase::Run => LifecycleEvent::Run,
        }
    }

    /// The context passed to `init` handlers when this phase loads the modules
    pub fn initialization_context(&self) -> InitializationContext {
        match self {
            LifecyclePhase::Install => InitializationContext::Install,
            LifecyclePhase::Build => InitializationContext::Build,
            LifecyclePhase::Run => InitializationContext::Run,
        }
    }
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.event(), f)
    }
}

/// Tells an `init` handler which phase triggered the module loading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InitializationContext {
    Install,
    Build,
    Run,
}

impl fmt::Display for InitializationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitializationContext::Install => write!(f, "INSTALL"),
            InitializationContext::Build => write!(f, "BUILD"),
            InitializationContext::Run => write!(f, "RUN"),
        }
    }
}

/// Sparse set of lifecycle event handlers exposed by a module.
///
/// An absent handler means "nothing to do" for that event.
#[derive(Default)]
pub struct LifecycleHandlers {
    init: Option<InitHandler>,
    install: Option<PhaseHandler>,
    build: Option<PhaseHandler>,
    run: Option<PhaseHandler>,
}

impl fmt::Debug for LifecycleHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleHandlers")
            .field("init", &self.init.is_some())
            .field("install", &self.install.is_some())
            .field("build", &self.build.is_some())
            .field("run", &self.run.is_some())
            .finish()
    }
}

impl LifecycleHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `init` handler
    pub fn on_init<F>(mut self, handler: F) -> Self
    where
        F: for<'a> Fn(&'a Arguments, &'a str, &'a mut PrimitiveContainer, InitializationContext) -> BoxFuture<'a>
            + Send
            + Sync
            + 'static,
    {
        self.init = Some(Box::new(handler));
        self
    }

    /// Set the `install` handler
    pub fn on_install<F>(self, handler: F) -> Self
    where
        F: for<'a> Fn(&'a Arguments, &'a str, &'a mut PrimitiveContainer) -> BoxFuture<'a> + Send + Sync + 'static,
    {
        self.on_phase(LifecyclePhase::Install, handler)
    }

    /// Set the `build` handler
    pub fn on_build<F>(self, handler: F) -> Self
    where
        F: for<'a> Fn(&'a Arguments, &'a str, &'a mut PrimitiveContainer) -> BoxFuture<'a> + Send + Sync + 'static,
    {
        self.on_phase(LifecyclePhase::Build, handler)
    }

    /// Set the `run` handler
    pub fn on_run<F>(self, handler: F) -> Self
    where
        F: for<'a> Fn(&'a Arguments, &'a str, &'a mut PrimitiveContainer) -> BoxFuture<'a> + Send + Sync + 'static,
    {
        self.on_phase(LifecyclePhase::Run, handler)
    }

    /// Set the handler of the event matching `phase`
    pub fn on_phase<F>(mut self, phase: LifecyclePhase, handler: F) -> Self
    where
        F: for<'a> Fn(&'a Arguments, &'a str, &'a mut PrimitiveContainer) -> BoxFuture<'a> + Send + Sync + 'static,
    {
        let slot = match phase {
            LifecyclePhase::Install => &mut self.install,
            LifecyclePhase::Build => &mut self.build,
            LifecyclePhase::Run => &mut self.run,
        };
        *slot = Some(Box::new(handler));
        self
    }

    /// Whether a handler is defined for `event`
    pub fn handles(&self, event: LifecycleEvent) -> bool {
        match event {
            LifecycleEvent::Init => self.init.is_some(),
            LifecycleEvent::Install => self.install.is_some(),
            LifecycleEvent::Build => self.build.is_some(),
            LifecycleEvent::Run => self.run.is_some(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.init.is_none() && self.install.is_none() && self.build.is_none() && self.run.is_none()
    }

    /// Split into the `init` handler and the handler for `phase`, dropping the rest
    pub fn into_parts(self, phase: LifecyclePhase) -> (Option<InitHandler>, Option<PhaseHandler>) {
        let phase_handler = match phase {
            LifecyclePhase::Install => self.install,
            LifecyclePhase::Build => self.build,
            LifecyclePhase::Run => self.run,
        };
        (self.init, phase_handler)
    }
}

/// Helper function to create synchronous `init` handlers
pub fn sync_init_handler<F>(f: F) -> impl for<'a> Fn(&'a Arguments, &'a str, &'a mut PrimitiveContainer, InitializationContext) -> BoxFuture<'a> + Send + Sync + 'static
where
    F: Fn(&Arguments, &str, &mut PrimitiveContainer, InitializationContext) -> Result<()> + Send + Sync + 'static,
{
    init_handler(move |args, env, container, context| {
        let result = f(args, env, container, context);
        Box::pin(async move { result })
    })
}

/// Helper function to create synchronous phase handlers
pub fn sync_phase_handler<F>(f: F) -> impl for<'a> Fn(&'a Arguments, &'a str, &'a mut PrimitiveContainer) -> BoxFuture<'a> + Send + Sync + 'static
where
    F: Fn(&Arguments, &str, &mut PrimitiveContainer) -> Result<()> + Send + Sync + 'static,
{
    phase_handler(move |args, env, container| {
        let result = f(args, env, container);
        Box::pin(async move { result })
    })
}

// Pins the closure signature so the higher-ranked lifetimes are inferred
fn init_handler<F>(f: F) -> F
where
    F: for<'a> Fn(&'a Arguments, &'a str, &'a mut PrimitiveContainer, InitializationContext) -> BoxFuture<'a>
        + Send
        + Sync
        + 'static,
{
    f
}

fn phase_handler<F>(f: F) -> F
where
    F: for<'a> Fn(&'a Arguments, &'a str, &'a mut PrimitiveContainer) -> BoxFuture<'a> + Send + Sync + 'static,
{
    f
}
