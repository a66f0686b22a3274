mod commands;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use larder::audit::enhanced::DEFAULT_BATCH_SIZE;
use larder::config::{self, Config, Site};
use larder::linker::DEFAULT_MAX_LINKS;
use larder::{log, logger};

#[derive(Parser)]
#[command(name = "larder")]
#[command(version, about = "Maintenance for a static blog and its ingredient encyclopedia")]
struct Cli {
    /// Site root; configured paths resolve against it
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Config file (default: <root>/larder.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print per-file detail
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write larder.toml and example patch rules
    Init,
    /// Check the ingredients database against its schema
    Validate {
        /// Drop duplicate aliases and save
        #[arg(long)]
        fix: bool,
    },
    /// Edit ingredient aliases
    #[command(subcommand)]
    Aliases(AliasesCommand),
    /// Add or remove ingredient records
    #[command(subcommand)]
    Ingredient(IngredientCommand),
    /// Generate deep ingredient pages
    Generate {
        /// Only this slug (skips the slug map)
        slug: Option<String>,
    },
    /// Generate the encyclopedia index page
    Directory,
    /// Read and edit sitemap.xml
    #[command(subcommand)]
    Sitemap(SitemapCommand),
    /// Submit URLs to IndexNow
    Indexnow {
        /// Submit every URL in the sitemap
        #[arg(long)]
        all: bool,
        /// URLs to submit
        urls: Vec<String>,
    },
    /// Insert contextual links
    #[command(subcommand)]
    Link(LinkCommand),
    /// Read-only content audits with JSON reports
    #[command(subcommand)]
    Audit(AuditCommand),
    /// Standardize Related Articles blocks
    #[command(subcommand)]
    Related(RelatedCommand),
    /// Apply find/replace rules from a TOML file
    Patch {
        /// Rules file
        rules: PathBuf,
        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },
    /// Split long FAQ answers in blog posts into short paragraphs
    Faqs,
    /// Refresh stale blog post dates
    Dates {
        /// Posts with dates before this month (YYYY-MM) are refreshed
        #[arg(long)]
        cutoff: Option<String>,
    },
}

#[derive(Subcommand)]
enum AliasesCommand {
    /// Append aliases to a record
    Add {
        name: String,
        #[arg(required = true)]
        aliases: Vec<String>,
    },
    /// Remove aliases from a record
    Remove {
        name: String,
        #[arg(required = true)]
        aliases: Vec<String>,
    },
    /// Apply {"add": {..}, "remove": {..}} from a JSON file
    Apply { file: PathBuf },
}

#[derive(Subcommand)]
enum IngredientCommand {
    /// Insert records from a JSON file in alphabetical position
    Add { file: PathBuf },
    /// Remove a record, its sitemap entry and its directory card
    Remove {
        name: String,
        /// Point links to the removed page at this slug
        #[arg(long)]
        redirect: Option<String>,
        /// Delete the page directory
        #[arg(long)]
        purge: bool,
    },
}

#[derive(Subcommand)]
enum SitemapCommand {
    /// Print every <loc>
    List,
    /// Add URLs not yet listed
    Add {
        #[arg(required = true)]
        urls: Vec<String>,
        /// YYYY-MM-DD (default: today)
        #[arg(long)]
        lastmod: Option<String>,
        #[arg(long)]
        changefreq: Option<String>,
        #[arg(long)]
        priority: Option<String>,
    },
    /// Remove URLs or ingredient slugs
    Remove {
        #[arg(required = true)]
        targets: Vec<String>,
    },
    /// Print analyzer, directory and ingredient entries
    Entries {
        /// YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Add the missing entries to the sitemap
        #[arg(long)]
        write: bool,
    },
}

#[derive(Subcommand)]
enum LinkCommand {
    /// Blog links in ingredient pages
    Pages {
        /// Links audit report; only flagged pages are linked
        #[arg(long)]
        report: Option<PathBuf>,
        /// JSON link rules
        #[arg(long)]
        rules: Option<PathBuf>,
        /// Links per page
        #[arg(long, default_value_t = DEFAULT_MAX_LINKS)]
        max: usize,
    },
    /// Ingredient links in blog posts
    Blog {
        /// JSON link rules
        #[arg(long)]
        rules: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum AuditCommand {
    /// Contextual links on ingredient pages
    Links,
    /// Inline links in blog posts
    Inline,
    /// Related Articles presence and format
    Related,
    /// Div balance in blog posts
    Divs,
    /// Pages without comparisons, in batches
    Enhanced {
        #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: usize,
    },
    /// Missing and incomplete comparison entries
    Comparisons,
}

#[derive(Subcommand)]
enum RelatedCommand {
    /// Rebuild or insert Related Articles blocks
    Fix {
        /// Related audit report
        #[arg(long)]
        report: Option<PathBuf>,
        /// JSON {post: [{url, title, description}]}
        #[arg(long)]
        suggestions: Option<PathBuf>,
    },
}

fn load_site(root: &Path, config: Option<&Path>) -> Result<Site> {
    let path = config.map_or_else(|| root.join(config::FILE_NAME), Path::to_path_buf);
    Ok(Site::new(root, Config::load(&path)?))
}

fn run(cli: Cli) -> Result<()> {
    if matches!(cli.command, Command::Init) {
        return commands::init::run(&cli.root);
    }
    let site = load_site(&cli.root, cli.config.as_deref())?;

    match cli.command {
        Command::Init => Ok(()),
        Command::Validate { fix } => commands::validate::run(&site, fix),
        Command::Aliases(cmd) => match cmd {
            AliasesCommand::Add { name, aliases } => commands::aliases::add(&site, &name, &aliases),
            AliasesCommand::Remove { name, aliases } => {
                commands::aliases::remove(&site, &name, &aliases)
            }
            AliasesCommand::Apply { file } => commands::aliases::apply(&site, &file),
        },
        Command::Ingredient(cmd) => match cmd {
            IngredientCommand::Add { file } => commands::ingredient::add(&site, &file),
            IngredientCommand::Remove { name, redirect, purge } => {
                commands::ingredient::remove(&site, &name, redirect.as_deref(), purge)
            }
        },
        Command::Generate { slug } => commands::generate::run(&site, slug.as_deref()),
        Command::Directory => commands::directory::run(&site),
        Command::Sitemap(cmd) => match cmd {
            SitemapCommand::List => commands::sitemap::list(&site),
            SitemapCommand::Add { urls, lastmod, changefreq, priority } => {
                let opts = commands::sitemap::AddOptions {
                    lastmod: lastmod.as_deref(),
                    changefreq: changefreq.as_deref(),
                    priority: priority.as_deref(),
                };
                commands::sitemap::add(&site, &urls, &opts)
            }
            SitemapCommand::Remove { targets } => commands::sitemap::remove(&site, &targets),
            SitemapCommand::Entries { date, write } => {
                commands::sitemap::entries(&site, date.as_deref(), write)
            }
        },
        Command::Indexnow { all, urls } => commands::indexnow::run(&site, all, &urls),
        Command::Link(cmd) => match cmd {
            LinkCommand::Pages { report, rules, max } => {
                commands::link::pages(&site, report.as_deref(), rules.as_deref(), max)
            }
            LinkCommand::Blog { rules } => commands::link::blog(&site, rules.as_deref()),
        },
        Command::Audit(cmd) => match cmd {
            AuditCommand::Links => commands::audit::links(&site),
            AuditCommand::Inline => commands::audit::inline(&site),
            AuditCommand::Related => commands::audit::related(&site),
            AuditCommand::Divs => commands::audit::divs(&site),
            AuditCommand::Enhanced { batch_size } => commands::audit::enhanced(&site, batch_size),
            AuditCommand::Comparisons => commands::audit::comparisons(&site),
        },
        Command::Related(RelatedCommand::Fix { report, suggestions }) => {
            commands::related::fix(&site, report.as_deref(), suggestions.as_deref())
        }
        Command::Patch { rules, dry_run } => commands::patch::run(&site, &rules, dry_run),
        Command::Faqs => commands::faqs::run(&site),
        Command::Dates { cutoff } => commands::dates::run(&site, cutoff.as_deref()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::set_verbose(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log!("error"; "{e:#}");
            ExitCode::FAILURE
        }
    }
}
