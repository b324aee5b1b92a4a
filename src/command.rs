//! Parsing of session input lines into app actions.

use anyhow::{Context as _, anyhow, bail};
use obgyn_core::AppAction;
use obgyn_core::directory::{DirectoryAction, StatusFilter};
use obgyn_core::editors::Edit;
use obgyn_core::editors::anc::{AncAction, AncSection, AncTab};
use obgyn_core::editors::gyne::GyneAction;
use obgyn_core::editors::medical_history::MedicalHistoryAction;
use obgyn_core::editors::obstetric_history::ObstetricHistoryAction;
use obgyn_core::editors::profile::ProfileAction;
use obgyn_core::editors::visit_log::VisitLogAction;
use obgyn_core::shell::{Section, ShellAction};
use obgyn_records::{EntryId, VisitTemplate};

pub const HELP: &str = "\
Directory:
  search <text>            filter by name, UHID or mobile
  status <all|active|delivered|closed>
  dismiss                  hide the current notice
  open <uhid>              open a patient
Patient:
  back                     return to the directory
  section <details|anc|medical-history|ob-history|gynecology|general>
  more                     toggle more details in the sidebar
  profile <begin|save|cancel> | profile set <path> <value>
  anc <new|edit|save|cancel|add-visit|add-test|add-ob>
  anc set <path> <value>   anc tab <name>   anc toggle <section>
  anc visit|test|ob <id> <path> <value>   anc remove-ob <id>
  gyne <new|save|cancel> | gyne open <id> | gyne set <path> <value>
  history <begin|save|cancel> | history set <path> <value>
  obhx <begin|add|save|cancel> | obhx set <id> <path> <value> | obhx remove <id>
  visit add <anc|gyne|general> | visit set <id> <path> <value>
Session:
  help | quit";

/// One line of session input.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Act(AppAction),
    Help,
    Quit,
}

/// Splits off the first whitespace-separated word.
fn next_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (input, ""),
    }
}

fn entry_id(word: &str) -> anyhow::Result<EntryId> {
    EntryId::parse(word).map_err(|e| anyhow!("{e}"))
}

/// `<path> <value>`; the value is the rest of the line and may be empty.
fn edit<F>(rest: &str) -> anyhow::Result<Edit<F>> {
    let (path, raw) = next_word(rest);
    if path.is_empty() {
        bail!("expected <path> <value>");
    }
    Ok(Edit::input(path, raw.trim_end()))
}

/// `<id> <path> <value>`.
fn entry_edit<F>(rest: &str) -> anyhow::Result<(EntryId, Edit<F>)> {
    let (id, rest) = next_word(rest);
    Ok((entry_id(id)?, edit(rest)?))
}

fn shell(action: ShellAction) -> Command {
    Command::Act(AppAction::Shell(action))
}

pub fn parse(line: &str) -> anyhow::Result<Command> {
    let (word, rest) = next_word(line);
    let command = match word {
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "search" => Command::Act(AppAction::Directory(DirectoryAction::Search(
            rest.trim_end().to_string(),
        ))),
        "status" => Command::Act(AppAction::Directory(DirectoryAction::SetStatus(
            rest.parse::<StatusFilter>()?,
        ))),
        "dismiss" => Command::Act(AppAction::Directory(DirectoryAction::DismissNotice)),
        "open" => Command::Act(AppAction::Select(rest.trim().to_string())),
        "back" => Command::Act(AppAction::BackToList),
        "section" => shell(ShellAction::ShowSection(rest.parse::<Section>()?)),
        "more" => shell(ShellAction::ToggleMoreDetails),
        "profile" => shell(ShellAction::Profile(parse_profile(rest)?)),
        "anc" => shell(ShellAction::Anc(parse_anc(rest)?)),
        "gyne" => shell(ShellAction::Gyne(parse_gyne(rest)?)),
        "history" => shell(ShellAction::MedicalHistory(parse_history(rest)?)),
        "obhx" => shell(ShellAction::ObstetricHistory(parse_obhx(rest)?)),
        "visit" => shell(ShellAction::Visits(parse_visit(rest)?)),
        "" => bail!("empty command"),
        other => bail!("unknown command '{other}'; type 'help'"),
    };
    Ok(command)
}

fn parse_profile(input: &str) -> anyhow::Result<ProfileAction> {
    let (verb, rest) = next_word(input);
    Ok(match verb {
        "begin" => ProfileAction::Begin,
        "set" => ProfileAction::Set(edit(rest)?),
        "save" => ProfileAction::Save,
        "cancel" => ProfileAction::Cancel,
        other => bail!("unknown profile command '{other}'"),
    })
}

fn parse_anc(input: &str) -> anyhow::Result<AncAction> {
    let (verb, rest) = next_word(input);
    Ok(match verb {
        "new" => AncAction::NewCase,
        "edit" => AncAction::BeginEdit,
        "save" => AncAction::Save,
        "cancel" => AncAction::Cancel,
        "set" => AncAction::Edit(edit(rest)?),
        "tab" => AncAction::SelectTab(
            AncTab::from_name(rest).with_context(|| format!("unknown ANC tab '{rest}'"))?,
        ),
        "toggle" => AncAction::ToggleSection(
            AncSection::from_name(rest)
                .with_context(|| format!("unknown ANC section '{rest}'"))?,
        ),
        "add-visit" => AncAction::AddFollowUpVisit,
        "add-test" => AncAction::AddFollowUpTest,
        "add-ob" => AncAction::AddPastPregnancy,
        "visit" => {
            let (id, edit) = entry_edit(rest)?;
            AncAction::EditFollowUpVisit(id, edit)
        }
        "test" => {
            let (id, edit) = entry_edit(rest)?;
            AncAction::EditFollowUpTest(id, edit)
        }
        "ob" => {
            let (id, edit) = entry_edit(rest)?;
            AncAction::EditPastPregnancy(id, edit)
        }
        "remove-ob" => AncAction::RemovePastPregnancy(entry_id(rest.trim())?),
        other => bail!("unknown ANC command '{other}'"),
    })
}

fn parse_gyne(input: &str) -> anyhow::Result<GyneAction> {
    let (verb, rest) = next_word(input);
    Ok(match verb {
        "new" => GyneAction::NewVisit,
        "open" => GyneAction::Open(entry_id(rest.trim())?),
        "set" => GyneAction::Edit(edit(rest)?),
        "save" => GyneAction::Save,
        "cancel" => GyneAction::Cancel,
        other => bail!("unknown gynecology command '{other}'"),
    })
}

fn parse_history(input: &str) -> anyhow::Result<MedicalHistoryAction> {
    let (verb, rest) = next_word(input);
    Ok(match verb {
        "begin" => MedicalHistoryAction::BeginEdit,
        "set" => MedicalHistoryAction::Edit(edit(rest)?),
        "save" => MedicalHistoryAction::Save,
        "cancel" => MedicalHistoryAction::Cancel,
        other => bail!("unknown history command '{other}'"),
    })
}

fn parse_obhx(input: &str) -> anyhow::Result<ObstetricHistoryAction> {
    let (verb, rest) = next_word(input);
    Ok(match verb {
        "begin" => ObstetricHistoryAction::BeginEdit,
        "add" => ObstetricHistoryAction::Add,
        "set" => {
            let (id, edit) = entry_edit(rest)?;
            ObstetricHistoryAction::Edit(id, edit)
        }
        "remove" => ObstetricHistoryAction::Remove(entry_id(rest.trim())?),
        "save" => ObstetricHistoryAction::Save,
        "cancel" => ObstetricHistoryAction::Cancel,
        other => bail!("unknown obstetric history command '{other}'"),
    })
}

fn parse_visit(input: &str) -> anyhow::Result<VisitLogAction> {
    let (verb, rest) = next_word(input);
    Ok(match verb {
        "add" => VisitLogAction::Add(
            VisitTemplate::from_name(rest)
                .with_context(|| format!("unknown visit template '{rest}'"))?,
        ),
        "set" => {
            let (id, edit) = entry_edit(rest)?;
            VisitLogAction::Edit(id, edit)
        }
        other => bail!("unknown visit command '{other}'"),
    })
}
