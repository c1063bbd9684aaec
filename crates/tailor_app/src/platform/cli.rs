use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "tailor")]
#[command(about = "Tailor a resume to a job description with the optimization service")]
#[command(version)]
pub struct Cli {
    /// RON configuration file (defaults to ./tailor.ron when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the optimization service
    #[arg(long, global = true)]
    pub service_url: Option<String>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Optimize a resume and export the result as PDF
    Run(RunArgs),
    /// Check that the optimization service is reachable
    Ping,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Resume file(s); only the first PDF or DOCX is used
    #[arg(long, required = true, num_args = 1..)]
    pub resume: Vec<PathBuf>,

    /// Job description text
    #[arg(long, conflicts_with = "job_file", required_unless_present = "job_file")]
    pub job: Option<String>,

    /// Read the job description from a file
    #[arg(long)]
    pub job_file: Option<PathBuf>,

    /// Keep name, email and phone in the optimized resume
    #[arg(long)]
    pub show_contact_details: bool,

    /// Open the optimized document in $VISUAL/$EDITOR before export
    #[arg(long)]
    pub edit: bool,

    /// Stop after optimization; do not write a PDF
    #[arg(long)]
    pub no_export: bool,

    /// Directory for optimized_resume.pdf
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Start Chromium without its sandbox (needed when running as root)
    #[arg(long)]
    pub no_sandbox: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_accepts_several_resumes_and_inline_job() {
        let cli = Cli::try_parse_from([
            "tailor", "-vv", "run", "--resume", "a.pdf", "b.docx", "--job", "Rust developer",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.resume, vec![PathBuf::from("a.pdf"), PathBuf::from("b.docx")]);
        assert_eq!(args.job.as_deref(), Some("Rust developer"));
        assert!(!args.show_contact_details);
        assert!(!args.no_export);
        assert!(!args.no_sandbox);
    }

    #[test]
    fn run_can_disable_chromium_sandbox() {
        let cli = Cli::try_parse_from([
            "tailor", "run", "--resume", "a.pdf", "--job", "x", "--no-sandbox",
        ])
        .unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert!(args.no_sandbox);
    }

    #[test]
    fn run_requires_a_job_source() {
        assert!(Cli::try_parse_from(["tailor", "run", "--resume", "a.pdf"]).is_err());
        assert!(Cli::try_parse_from([
            "tailor", "run", "--resume", "a.pdf", "--job", "x", "--job-file", "job.txt",
        ])
        .is_err());
    }

    #[test]
    fn ping_takes_global_service_url() {
        let cli = Cli::try_parse_from(["tailor", "ping", "--service-url", "http://svc:9000"])
            .unwrap();
        assert!(matches!(cli.command, Command::Ping));
        assert_eq!(cli.service_url.as_deref(), Some("http://svc:9000"));
    }
}
