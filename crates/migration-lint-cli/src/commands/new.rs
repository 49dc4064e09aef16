//! New command implementation.

use anyhow::Result;
use migration_lint_core::{MigrationKind, Scaffold};

use crate::NewArgs;

/// Template choice on the command line.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum TemplateKind {
    /// New table with comment, trigger and RLS.
    #[default]
    Table,
    /// Alter an existing table.
    Alter,
    /// Versioned plpgsql function.
    Function,
    /// Row-level-security policies.
    Rls,
    /// Bare transaction.
    Empty,
}

impl From<TemplateKind> for MigrationKind {
    fn from(kind: TemplateKind) -> Self {
        match kind {
            TemplateKind::Table => Self::Table,
            TemplateKind::Alter => Self::Alter,
            TemplateKind::Function => Self::Function,
            TemplateKind::Rls => Self::Rls,
            TemplateKind::Empty => Self::Empty,
        }
    }
}

/// Runs the new command.
pub fn run(args: &NewArgs) -> Result<()> {
    let created = chrono::Local::now().naive_local();
    let scaffold = Scaffold::new(args.description.as_str(), args.kind.into(), created)?
        .author(args.author.as_str());

    if args.dry_run {
        let path = args.dir.join(scaffold.file_name());
        println!("# Would create: {}\n", path.display());
        print!("{}", scaffold.render());
        return Ok(());
    }

    let path = scaffold.create(&args.dir)?;
    println!("Created: {}", path.display());
    Ok(())
}
