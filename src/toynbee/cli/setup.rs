use clap::Parser;
use std::sync::OnceLock;
use std::time::Duration;
use toynbee::endpoints::DEFAULT_ENDPOINTS;
use toynbee::inspect::{InspectOptions, DEFAULT_PATH};
use toynbee::render::DEFAULT_TEMPLATE;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.1" for releases, "0.3.1@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

/// Help footer listing the URL patterns that get queried.
fn get_endpoint_help() -> &'static str {
    static HELP: OnceLock<String> = OnceLock::new();

    HELP.get_or_init(|| {
        let mut help = String::from("Endpoints (PROJECT is substituted for {app}):\n");
        for endpoint in DEFAULT_ENDPOINTS {
            help.push_str(&format!(
                "  {:<40} {}\n",
                endpoint.base_url("{app}"),
                endpoint.label()
            ));
        }
        help.push_str(
            "\nTemplates use Jinja2 syntax. Every key of the JSON response is a variable,\n\
             and {{ commitDetail }} holds the endpoint label. The default template is:\n\
             \n  commitDetail: {{ commitDetail }}<TAB>Commit: {{ commit }}\n",
        );
        help
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "toynbee-tiles",
    bin_name = "toynbee-tiles",
    version = get_version(),
    after_help = get_endpoint_help()
)]
#[command(
    about = "Verify commit details in production",
    long_about = "Verify commit details in production. For every PROJECT, either extract the \
                  commit from each production endpoint or open each endpoint in the browser."
)]
pub struct Cli {
    /// Application names to look up
    #[arg(value_name = "PROJECT")]
    pub projects: Vec<String>,

    /// The URL path to either launch or to extract version info from
    #[arg(short, long, default_value = DEFAULT_PATH)]
    pub path: String,

    /// Template printed for each endpoint; ignored with --open
    #[arg(short, long, default_value = DEFAULT_TEMPLATE, hide_default_value = true)]
    pub template: String,

    /// Open every production endpoint in the browser
    #[arg(short = 'b', long)]
    pub open: bool,

    /// Give up on an endpoint after this many seconds (default: wait forever)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn options(&self) -> InspectOptions {
        InspectOptions::new(self.projects.clone())
            .with_path(self.path.clone())
            .with_open(self.open)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}
