//! XTask - build automation for Solunar
//!
//! # Usage
//! ```sh
//! cargo xtask dist-web        # wasm-pack build for browsers and Node
//! cargo xtask dist-python     # maturin wheel
//! cargo xtask dev-web         # sun/moon demo page over the web build
//! cargo xtask test            # workspace tests, bindings excluded
//! cargo xtask bench           # criterion benchmarks
//! cargo xtask build-all       # everything above that produces artifacts
//! cargo xtask sync-versions   # copy the workspace version into manifests
//! cargo xtask publish-crates [--dry-run]
//! ```

use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Workspace crates in publish order (leaves first, facade last).
const WORKSPACE_CRATES: &[(&str, &str)] = &[
    ("solunar-types", "crates/solunar-types"),
    ("solunar-time", "crates/solunar-time"),
    ("solunar-astronomy", "crates/solunar-astronomy"),
    ("solunar-core", "crates/solunar_core"),
    ("solunar", "crates/solunar"),
];

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(task) = args.first() else {
        print_usage();
        return Ok(());
    };
    let dry_run = args.iter().any(|a| a == "--dry-run" || a == "-n");

    match task.as_str() {
        "dist-web" => dist_web(),
        "dist-python" => dist_python(),
        "dev-web" => dev_web(),
        "test" => run_cmd("cargo", &["test", "--workspace", "--exclude", "solunar-wasm", "--exclude", "solunar-py"]),
        "bench" => run_cmd("cargo", &["bench", "-p", "solunar-core"]),
        "build-all" => build_all(),
        "sync-versions" => sync_versions(),
        "publish-crates" => publish_crates(dry_run),
        "-h" | "--help" | "help" => {
            print_usage();
            Ok(())
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!(r#"
Solunar XTask - Build Automation

USAGE:
    cargo xtask <COMMAND> [OPTIONS]

COMMANDS:
    dist-web        Build the WASM package (web + nodejs targets)
                    Output: dist/web/, pkg/
    dist-python     Build the Python wheel via maturin
                    Output: dist/python/
    dev-web         Build dist/web and add a demo page in dist/dev/
    test            Run workspace tests (bindings excluded)
    bench           Run criterion benchmarks
    build-all       Release build + dist-web + dist-python
    sync-versions   Copy the workspace version into pkg/ and pyproject.toml
    publish-crates  Publish crates to crates.io in dependency order

OPTIONS:
    --dry-run, -n   Validate without publishing
"#);
}

fn project_root() -> Result<PathBuf> {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .context("Failed to find project root")?
        .to_path_buf();
    Ok(root)
}

fn run_cmd(cmd: &str, args: &[&str]) -> Result<()> {
    run_cmd_in_dir(&project_root()?, cmd, args)
}

fn run_cmd_in_dir(dir: &Path, cmd: &str, args: &[&str]) -> Result<()> {
    println!("  → [{}] {} {}", dir.display(), cmd, args.join(" "));

    let mut command = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.args(["/C", cmd]);
        c
    } else {
        Command::new(cmd)
    };
    let status = command
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|| format!("Failed to start: {} {}", cmd, args.join(" ")))?;

    if !status.success() {
        bail!("Command '{}' failed with exit code: {:?}", cmd, status.code());
    }
    Ok(())
}

fn command_exists(cmd: &str) -> bool {
    let finder = if cfg!(windows) { "where" } else { "which" };
    Command::new(finder)
        .arg(cmd)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

fn ensure_tool(tool: &str, install: (&str, &[&str])) -> Result<()> {
    if !command_exists(tool) {
        println!("  {} not found. Installing...", tool);
        run_cmd(install.0, install.1)?;
    }
    Ok(())
}

/// Version from `[workspace.package]` in the root manifest.
fn read_workspace_version() -> Result<String> {
    let content = fs::read_to_string(project_root()?.join("Cargo.toml"))?;
    let mut in_package = false;
    for line in content.lines().map(str::trim) {
        if line.starts_with('[') {
            in_package = line == "[workspace.package]";
            continue;
        }
        if in_package && line.starts_with("version") {
            if let Some(version) = line.split('"').nth(1) {
                return Ok(version.to_string());
            }
        }
    }
    bail!("Could not find [workspace.package] version in Cargo.toml")
}

/// Rewrites every line starting with `key` as `render(version)`.
fn rewrite_version_lines(path: &Path, key: &str, render: impl Fn(&str) -> String, version: &str) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let content = fs::read_to_string(path)?;
    let updated: Vec<String> = content
        .lines()
        .map(|line| if line.trim().starts_with(key) { render(version) } else { line.to_string() })
        .collect();
    fs::write(path, updated.join("\n") + "\n")?;
    println!("  Updated {}", path.display());
    Ok(())
}

fn sync_versions() -> Result<()> {
    let root = project_root()?;
    let version = read_workspace_version()?;
    println!("Syncing version {} ...", version);

    rewrite_version_lines(&root.join("pkg/package.json"), "\"version\"", |v| format!("  \"version\": \"{}\",", v), &version)?;
    rewrite_version_lines(&root.join("bindings/solunar_py/pyproject.toml"), "version =", |v| format!("version = \"{}\"", v), &version)?;
    Ok(())
}

fn dist_web() -> Result<()> {
    println!("\nBuilding WASM package...\n");
    let root = project_root()?;
    let wasm_dir = root.join("bindings").join("solunar_wasm");
    ensure_tool("wasm-pack", ("cargo", &["install", "wasm-pack"]))?;

    for (target, out) in [("web", root.join("dist").join("web")), ("nodejs", root.join("pkg"))] {
        run_cmd_in_dir(&wasm_dir, "wasm-pack", &[
            "build",
            "--release",
            "--target", target,
            "--out-dir", out.to_string_lossy().as_ref(),
            "--out-name", "solunar",
        ])?;
    }

    let pkg_json = root.join("pkg").join("package.json");
    if pkg_json.exists() {
        let content = fs::read_to_string(&pkg_json)?;
        fs::write(&pkg_json, content.replace("\"name\": \"solunar-wasm\"", "\"name\": \"solunar\""))?;
        println!("  Patched package.json name");
    }
    Ok(())
}

fn dist_python() -> Result<()> {
    println!("\nBuilding Python wheel...\n");
    let root = project_root()?;
    let out = root.join("dist").join("python");
    ensure_tool("maturin", ("pip", &["install", "maturin"]))?;
    fs::create_dir_all(&out)?;

    run_cmd_in_dir(&root.join("bindings").join("solunar_py"), "maturin", &[
        "build",
        "--release",
        "--out", out.to_string_lossy().as_ref(),
    ])
}

fn dev_web() -> Result<()> {
    dist_web()?;
    let root = project_root()?;
    let dev = root.join("dist").join("dev");
    fs::create_dir_all(&dev)?;

    for entry in fs::read_dir(root.join("dist").join("web"))? {
        let entry = entry?;
        if entry.path().is_file() {
            fs::copy(entry.path(), dev.join(entry.file_name()))?;
        }
    }
    fs::write(dev.join("index.html"), DEV_PAGE)?;

    println!("\nDemo page ready: python -m http.server 8080 -d dist/dev");
    Ok(())
}

const DEV_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Solunar - WASM Test</title>
    <style>
        body { font-family: system-ui, sans-serif; max-width: 720px; margin: 2rem auto; }
        input { padding: 0.4rem; width: 7rem; }
        pre { background: #f5f5f5; padding: 1rem; }
    </style>
</head>
<body>
    <h1>Solunar</h1>
    <input id="lat" value="50.5"> <input id="lng" value="30.5"> <input id="date" type="date">
    <button id="go">Compute</button>
    <pre id="result"></pre>
    <script type="module">
        import init, { getTimes, getMoonIllumination, getMoonTimes } from './solunar.js';
        await init();
        document.getElementById('date').valueAsDate = new Date();
        document.getElementById('go').onclick = () => {
            const lat = parseFloat(document.getElementById('lat').value);
            const lng = parseFloat(document.getElementById('lng').value);
            const ms = document.getElementById('date').valueAsDate.getTime() + 12 * 3600e3;
            const fmt = (t) => t === null || t === undefined ? '--' : new Date(t).toISOString();
            const times = getTimes(ms, lat, lng);
            const lines = Object.entries(times)
                .sort((a, b) => (a[1] ?? Infinity) - (b[1] ?? Infinity))
                .map(([k, v]) => `${k.padEnd(16)} ${fmt(v)}`);
            const moon = getMoonIllumination(ms);
            const mt = getMoonTimes(ms, lat, lng);
            lines.push('', `moon ${moon.phaseName} ${(moon.fraction * 100).toFixed(0)}%`,
                `moonrise ${fmt(mt.rise)}  moonset ${fmt(mt.set)}`);
            document.getElementById('result').textContent = lines.join('\n');
        };
    </script>
</body>
</html>"#;

fn build_all() -> Result<()> {
    sync_versions()?;
    run_cmd("cargo", &["build", "--release", "-p", "solunar"])?;
    dist_web()?;
    dist_python()?;

    println!("\nAll builds complete:");
    println!(" - Rust: target/release");
    println!(" - WASM: dist/web/, pkg/");
    println!(" - Python: dist/python/");
    Ok(())
}

fn publish_crates(dry_run: bool) -> Result<()> {
    let root = project_root()?;

    for (name, dir) in WORKSPACE_CRATES {
        println!("  Publishing {}...", name);
        let mut args = vec!["publish"];
        if dry_run {
            args.push("--dry-run");
        }

        let output = Command::new("cargo")
            .args(&args)
            .current_dir(root.join(dir))
            .output()
            .with_context(|| format!("Failed to run cargo publish for {}", name))?;
        let stderr = String::from_utf8_lossy(&output.stderr);

        if output.status.success() {
            println!("  {} published", name);
        } else if stderr.contains("already exists") {
            println!("  {} already published, skipping", name);
            continue;
        } else {
            eprintln!("{}", String::from_utf8_lossy(&output.stdout));
            eprintln!("{}", stderr);
            bail!("Failed to publish {}", name);
        }

        // crates.io index lag
        if !dry_run {
            std::thread::sleep(std::time::Duration::from_secs(30));
        }
    }
    Ok(())
}
