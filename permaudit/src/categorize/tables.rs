use super::Category;
use super::rule::{Predicate::*, Rule, Table};

pub const COMMAND_DENY: &[Rule] = &[
    Rule::new(Command("curl"), "network access"),
    Rule::new(Command("wget"), "network access"),
    Rule::new(Command("sudo"), "privilege escalation"),
    Rule::new(Command("ssh"), "remote access"),
    Rule::new(Command("scp"), "remote copy"),
    Rule::new(Command("eval"), "arbitrary code execution"),
    Rule::new(Command("gh auth"), "authentication change"),
];

pub const COMMAND_ASK: &[Rule] = &[
    Rule::new(Command("git commit"), "git write operation"),
    Rule::new(Command("git push"), "git remote operation"),
    Rule::new(Command("git rebase"), "git history rewrite"),
    Rule::new(Command("git reset"), "git history rewrite"),
    Rule::new(StartsWith("rm -rf"), "recursive deletion"),
    Rule::new(StartsWith("rm -r"), "recursive deletion"),
];

pub const COMMAND_SAFE: &[Rule] = &[
    Rule::new(Command("git status"), "git read-only"),
    Rule::new(Command("git log"), "git read-only"),
    Rule::new(Command("git diff"), "git read-only"),
    Rule::new(Command("git branch"), "git read-only"),
    Rule::new(Command("git fetch"), "git read-only"),
    Rule::new(Command("git ls-tree"), "git read-only"),
    Rule::new(Command("git rev-parse"), "git read-only"),
    Rule::new(Command("git rev-list"), "git read-only"),
    Rule::new(Command("git show"), "git read-only"),
    Rule::new(Command("git add"), "git staging"),
    Rule::new(Command("git mv"), "git file operation"),
    Rule::new(Command("git rm"), "git file operation"),
    Rule::new(Command("git checkout"), "git branch operation"),
    Rule::new(Command("git pull"), "git sync"),
    Rule::new(StartsWith("go "), "Go toolchain"),
    Rule::new(StartsWith("task "), "task runner"),
    Rule::new(StartsWith("make "), "build tool"),
    Rule::new(Command("gh pr"), "GitHub CLI read-only"),
    Rule::new(Command("gh run"), "GitHub CLI read-only"),
    Rule::new(Command("gh repo"), "GitHub CLI read-only"),
    Rule::new(Command("gh api"), "GitHub API"),
    Rule::new(Command("gh issue"), "GitHub CLI read-only"),
    Rule::new(Command("brew list"), "Homebrew read-only"),
    Rule::new(Command("brew info"), "Homebrew read-only"),
    Rule::new(Command("brew install"), "Homebrew install"),
    Rule::new(Exact("ls"), "file listing"),
    Rule::new(StartsWith("golangci-lint"), "linter"),
    Rule::new(StartsWith("docker "), "Docker"),
    Rule::new(StartsWith("cargo "), "Cargo"),
    Rule::new(Command("npm test"), "npm scripts"),
    Rule::new(Command("npm run"), "npm scripts"),
    Rule::new(Command("npm ci"), "npm install from lockfile"),
    Rule::new(Command("npm ls"), "npm read-only"),
];

pub const PATH_DENY: &[Rule] = &[
    Rule::new(StartsWith("~/.ssh/"), "SSH keys"),
    Rule::new(StartsWith("~/.aws/"), "AWS credentials"),
    Rule::new(StartsWith("~/.gnupg/"), "GPG keys"),
    Rule::new(StartsWith("~/.kube/"), "Kubernetes config"),
    Rule::new(
        OneOf(&[".env", ".env.local", ".env.development", ".env.production"]),
        "environment file",
    ),
    Rule::new(Basename(&["credentials", "credentials.json"]), "credentials file"),
    Rule::new(Exact("~/.docker/config.json"), "Docker credentials"),
    Rule::new(OneOf(&["~/.zsh_history", "~/.bash_history"]), "shell history"),
    Rule::new(Exact("~/.netrc"), "network credentials"),
    Rule::new(Basename(&["id_rsa", "id_ed25519"]), "private key"),
];

pub const PATH_SAFE: &[Rule] = &[
    Rule::new(Exact("CLAUDE.md"), "Claude instructions"),
    Rule::new(StartsWith(".claude/"), "Claude config directory"),
    Rule::new(StartsWith("~/.claude/"), "Claude config directory"),
    Rule::new(StartsWith("src/"), "source code"),
    Rule::new(StartsWith("docs/"), "documentation"),
    Rule::new(StartsWith("cmd/"), "command source"),
    Rule::new(StartsWith("config/"), "configuration"),
    Rule::new(StartsWith("test/"), "tests"),
    Rule::new(StartsWith("tests/"), "tests"),
    Rule::new(StartsWith("classes/"), "class files"),
    Rule::new(Exact(".env.sample"), "sample environment file"),
];

pub const DOMAIN_SAFE: &[Rule] = &[
    Rule::new(StartsWith("docs."), "official documentation"),
    Rule::new(StartsWith("developer."), "official developer site"),
    Rule::new(EndsWith(".readthedocs.io"), "Read the Docs"),
    Rule::new(OneOf(&["github.com", "raw.githubusercontent.com"]), "code hosting"),
    Rule::new(Exact("gitlab.com"), "code hosting"),
    Rule::new(OneOf(&["pkg.go.dev", "go.dev"]), "Go package registry"),
    Rule::new(OneOf(&["www.npmjs.com", "npmjs.com"]), "npm package registry"),
    Rule::new(Exact("crates.io"), "Rust package registry"),
    Rule::new(Exact("registry.terraform.io"), "Terraform registry"),
    Rule::new(Exact("cloud.google.com"), "Google Cloud documentation"),
    Rule::new(EndsWith(".databricks.com"), "Databricks"),
    Rule::new(EndsWith(".anthropic.com"), "Anthropic"),
];

pub const DOMAIN_MEDIUM: &[Rule] = &[
    Rule::new(OneOf(&["stackoverflow.com", "www.stackoverflow.com"]), "Q&A community"),
    Rule::new(Exact("medium.com"), "blog platform"),
    Rule::new(Exact("dev.to"), "developer community"),
    Rule::new(Exact("learning.oreilly.com"), "learning platform"),
];

pub const COMMAND_PIPELINE: &[Table] = &[
    Table {
        category: Category::Deny,
        rules: COMMAND_DENY,
    },
    Table {
        category: Category::Ask,
        rules: COMMAND_ASK,
    },
    Table {
        category: Category::Safe,
        rules: COMMAND_SAFE,
    },
];

pub const PATH_PIPELINE: &[Table] = &[
    Table {
        category: Category::Deny,
        rules: PATH_DENY,
    },
    Table {
        category: Category::Safe,
        rules: PATH_SAFE,
    },
];

pub const DOMAIN_PIPELINE: &[Table] = &[
    Table {
        category: Category::Safe,
        rules: DOMAIN_SAFE,
    },
    Table {
        category: Category::Medium,
        rules: DOMAIN_MEDIUM,
    },
];
