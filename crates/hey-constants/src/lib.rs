pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PACKAGE_NAME: &str = "@hey-cli/core";
pub const DESCRIPTION: &str = "Scaffold new projects from npm-hosted templates";
pub const REPOSITORY_URL: &str = "https://github.com/hey-cli/hey";
pub const BIN_NAME: &str = "hey";
pub const COMMANDS: &[(&str, &str, &[&str])] = &[
    (
        "init",
        "Creates a new project from a template package",
        &["new", "create"],
    ),
    (
        "help",
        "Shows help information for hey or a specific command",
        &[],
    ),
];
pub const EXAMPLES: &[(&str, &str)] = &[
    ("hey init my-app", "Create my-app from the default template"),
    ("hey init my-app --force", "Reuse a non-empty directory"),
    (
        "hey init my-app --template @hey-cli/template-vue@1.2.0",
        "Use a specific template version",
    ),
    (
        "hey --target-path ../my-template init my-app",
        "Use a local template checkout",
    ),
    ("hey --mirror init my-app", "Resolve packages through the mirror"),
];

pub const NPM_REGISTRY: &str = "https://registry.npmjs.org";
pub const NPM_MIRROR_REGISTRY: &str = "https://registry.npmmirror.org";
pub const DEFAULT_TEMPLATE: &str = "@hey-cli/template-default";
pub const LATEST_TAG: &str = "latest";

pub const USER_AGENT: &str = concat!("hey-cli/", env!("CARGO_PKG_VERSION"));
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

pub const CLI_HOME_DIR: &str = ".hey-cli";
pub const CLI_HOME_ENV: &str = "HEY_CLI_HOME";
pub const REGISTRY_ENV: &str = "HEY_REGISTRY";
pub const MANIFEST_FILE: &str = "package.json";
pub const TEMPLATE_SUBDIR: &str = "template";
