//! Command execution protocol
//!
//! A command is a guard + effect pair: `can_execute` is a pure check of
//! which contexts the action is meaningful in, `execute` runs the host
//! effect and folds every failure (including panics from host closures)
//! into a `CommandResult`. The dispatch loop's error path is thereby
//! reserved for true programming errors.
//!
//! Host effects are supplied through `HostAdapters`, plain shared
//! closures over the application's stores (clipboard, prompt list,
//! modals). The engine never inspects what a handler does - it only
//! calls it by action.

use chrono::{DateTime, Local};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use crate::core::types::{Action, CommandResult, Context, ShortcutDefinition};

/// Error type host effects may fail with.
pub type HostError = Box<dyn std::error::Error>;

/// A host effect taking no parameters.
pub type ActionFn = Rc<dyn Fn() -> Result<(), HostError>>;

/// A host effect taking a quick-access slot number.
pub type SlotFn = Rc<dyn Fn(u8) -> Result<(), HostError>>;

/// Polymorphic unit of executable behaviour bound to a shortcut id.
pub trait Command {
    /// The shortcut id this command is bound to.
    fn id(&self) -> &str;

    /// Pure, synchronous guard: is this action meaningful in `context`?
    fn can_execute(&self, context: Context) -> bool;

    /// Runs the effect. Never propagates host failures; they come back
    /// as a failed `CommandResult`.
    fn execute(&mut self) -> CommandResult;

    /// Reverts execution bookkeeping. Idempotent and safe to call even
    /// if `execute` never ran.
    fn undo(&mut self) {}
}

/// Which contexts a command's guard admits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContextGuard {
    /// Meaningful everywhere (cancel, confirm, help)
    Anywhere,
    /// Only in the listed contexts (navigation in list/search, save in form)
    Only(Vec<Context>),
    /// Everywhere except the listed contexts (new prompt outside forms)
    Except(Vec<Context>),
}

impl ContextGuard {
    /// Evaluates the guard against a context.
    pub fn allows(&self, context: Context) -> bool {
        match self {
            ContextGuard::Anywhere => true,
            ContextGuard::Only(contexts) => contexts.contains(&context),
            ContextGuard::Except(contexts) => !contexts.contains(&context),
        }
    }
}

/// The single command shape used for every catalog action.
///
/// Commands are created once at registry-build time and are stateless
/// except for the last-executed bookkeeping that backs `undo`.
pub struct ActionCommand {
    id: String,
    description: &'static str,
    guard: ContextGuard,
    effect: ActionFn,
    undoable: bool,
    last_executed: Option<DateTime<Local>>,
}

impl ActionCommand {
    /// Wall-clock time of the most recent successful execution.
    pub fn last_executed(&self) -> Option<DateTime<Local>> {
        self.last_executed
    }
}

impl Command for ActionCommand {
    fn id(&self) -> &str {
        &self.id
    }

    fn can_execute(&self, context: Context) -> bool {
        self.guard.allows(context)
    }

    fn execute(&mut self) -> CommandResult {
        let effect = &self.effect;
        match catch_unwind(AssertUnwindSafe(|| effect())) {
            Ok(Ok(())) => {
                self.last_executed = Some(Local::now());
                CommandResult::ok_with(self.description)
            }
            Ok(Err(e)) => CommandResult::fail(e.to_string()),
            Err(_) => CommandResult::fail(format!("'{}' panicked during execution", self.id)),
        }
    }

    fn undo(&mut self) {
        if self.undoable {
            self.last_executed = None;
        }
    }
}

/// Host-supplied store functions for navigation actions.
pub struct NavigationAdapter {
    pub navigate_up: ActionFn,
    pub navigate_down: ActionFn,
    pub select_first: ActionFn,
    pub select_last: ActionFn,
}

/// Host-supplied store functions for prompt CRUD actions.
pub struct PromptAdapter {
    pub new_prompt: ActionFn,
    pub edit_prompt: ActionFn,
    pub copy_prompt: ActionFn,
    pub delete_prompt: ActionFn,
}

/// Host-supplied store functions for the edit form.
pub struct FormAdapter {
    pub save: ActionFn,
    pub save_and_close: ActionFn,
    pub cancel_edit: ActionFn,
    pub indent: ActionFn,
    pub outdent: ActionFn,
    pub focus_next_field: ActionFn,
    pub focus_prev_field: ActionFn,
}

/// Host-supplied functions for application-level actions.
pub struct ShellAdapter {
    pub confirm: ActionFn,
    pub cancel: ActionFn,
    pub focus_search: ActionFn,
    pub show_help: ActionFn,
    pub open_settings: ActionFn,
    pub command_palette: ActionFn,
}

/// Host-supplied function for pinned-prompt quick access.
pub struct PaletteAdapter {
    pub select_slot: SlotFn,
}

/// The full adapter seam between the engine and the host application.
///
/// All functions are plain shared closures; the host decides what store
/// or service backs each one.
pub struct HostAdapters {
    pub navigation: NavigationAdapter,
    pub prompts: PromptAdapter,
    pub form: FormAdapter,
    pub shell: ShellAdapter,
    pub palette: PaletteAdapter,
}

impl HostAdapters {
    /// Inert adapters whose effects all succeed without doing anything.
    ///
    /// Useful for tests and dry-run tooling that only exercises
    /// resolution and dispatch mechanics.
    pub fn noop() -> Self {
        let ok: ActionFn = Rc::new(|| Ok(()));
        Self {
            navigation: NavigationAdapter {
                navigate_up: ok.clone(),
                navigate_down: ok.clone(),
                select_first: ok.clone(),
                select_last: ok.clone(),
            },
            prompts: PromptAdapter {
                new_prompt: ok.clone(),
                edit_prompt: ok.clone(),
                copy_prompt: ok.clone(),
                delete_prompt: ok.clone(),
            },
            form: FormAdapter {
                save: ok.clone(),
                save_and_close: ok.clone(),
                cancel_edit: ok.clone(),
                indent: ok.clone(),
                outdent: ok.clone(),
                focus_next_field: ok.clone(),
                focus_prev_field: ok.clone(),
            },
            shell: ShellAdapter {
                confirm: ok.clone(),
                cancel: ok.clone(),
                focus_search: ok.clone(),
                show_help: ok.clone(),
                open_settings: ok.clone(),
                command_palette: ok.clone(),
            },
            palette: PaletteAdapter {
                select_slot: Rc::new(|_| Ok(())),
            },
        }
    }
}

/// Builds the command for one catalog definition.
///
/// The match over `Action` is exhaustive: a new action variant will not
/// compile until it is given a guard and an effect here.
pub fn command_for(def: &ShortcutDefinition, adapters: &HostAdapters) -> ActionCommand {
    use Context::{Form, List, Search};

    let (guard, effect, undoable): (ContextGuard, ActionFn, bool) = match def.action {
        Action::NavigateUp => (
            ContextGuard::Only(vec![List, Search]),
            adapters.navigation.navigate_up.clone(),
            false,
        ),
        Action::NavigateDown => (
            ContextGuard::Only(vec![List, Search]),
            adapters.navigation.navigate_down.clone(),
            false,
        ),
        Action::SelectFirst => (
            ContextGuard::Only(vec![List]),
            adapters.navigation.select_first.clone(),
            false,
        ),
        Action::SelectLast => (
            ContextGuard::Only(vec![List]),
            adapters.navigation.select_last.clone(),
            false,
        ),
        Action::NewPrompt => (
            ContextGuard::Except(vec![Form]),
            adapters.prompts.new_prompt.clone(),
            false,
        ),
        Action::EditPrompt => (
            ContextGuard::Except(vec![Form]),
            adapters.prompts.edit_prompt.clone(),
            false,
        ),
        Action::CopyPrompt => (
            ContextGuard::Except(vec![Form]),
            adapters.prompts.copy_prompt.clone(),
            false,
        ),
        Action::DeletePrompt => (
            ContextGuard::Except(vec![Form]),
            adapters.prompts.delete_prompt.clone(),
            false,
        ),
        Action::SavePrompt => (
            ContextGuard::Only(vec![Form]),
            adapters.form.save.clone(),
            true,
        ),
        Action::SaveAndClose => (
            ContextGuard::Only(vec![Form]),
            adapters.form.save_and_close.clone(),
            true,
        ),
        Action::CancelEdit => (
            ContextGuard::Only(vec![Form]),
            adapters.form.cancel_edit.clone(),
            false,
        ),
        Action::IndentText => (
            ContextGuard::Only(vec![Form]),
            adapters.form.indent.clone(),
            false,
        ),
        Action::OutdentText => (
            ContextGuard::Only(vec![Form]),
            adapters.form.outdent.clone(),
            false,
        ),
        Action::FocusNextField => (
            ContextGuard::Only(vec![Form]),
            adapters.form.focus_next_field.clone(),
            false,
        ),
        Action::FocusPrevField => (
            ContextGuard::Only(vec![Form]),
            adapters.form.focus_prev_field.clone(),
            false,
        ),
        Action::Confirm => (ContextGuard::Anywhere, adapters.shell.confirm.clone(), false),
        Action::Cancel => (ContextGuard::Anywhere, adapters.shell.cancel.clone(), true),
        Action::FocusSearch => (
            ContextGuard::Anywhere,
            adapters.shell.focus_search.clone(),
            false,
        ),
        Action::ShowHelp => (ContextGuard::Anywhere, adapters.shell.show_help.clone(), false),
        Action::OpenSettings => (
            ContextGuard::Anywhere,
            adapters.shell.open_settings.clone(),
            false,
        ),
        Action::CommandPalette => (
            ContextGuard::Anywhere,
            adapters.shell.command_palette.clone(),
            false,
        ),
        Action::QuickAccess => {
            // Slot is validated at catalog construction; missing means a
            // definition built by hand, treat as slot 1.
            let slot = def.slot.unwrap_or(1);
            let select = adapters.palette.select_slot.clone();
            let effect: ActionFn = Rc::new(move || select(slot));
            (ContextGuard::Except(vec![Form]), effect, false)
        }
    };

    ActionCommand {
        id: def.id.clone(),
        description: def.description(),
        guard,
        effect,
        undoable,
        last_executed: None,
    }
}
