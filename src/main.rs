extern crate ctrlc;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
extern crate log4rs;
extern crate rusty_build_tracker;

use failure::Error;
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use rusty_build_tracker::config_file::Config;
use rusty_build_tracker::integrations::JenkinsIntegration;
use rusty_build_tracker::jobtracker::{factory, TrackedBuildJob};
use rusty_build_tracker::model::{Build, BuildStatus};
use rusty_build_tracker::{BuildStatusAggregator, FinishedBuildWatcher, JobRegistry};
use std::env;
use std::process;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

const DEFAULT_CONFIG_FILE: &str = "config.toml";
const SLEEP_STEP_MS: u64 = 250;
const REPORTED_TEST_FAILURES: usize = 5;
const CONSOLE_TAIL_LINES: usize = 20;

fn main() {
    if let Err(e) = init_logging() {
        eprintln!("Unable to set up logging: {}", e);
    }

    let config_path = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());
    if let Err(e) = run(&config_path) {
        error!("--Tracker--: {}", e);
        process::exit(1);
    }
}

fn init_logging() -> Result<(), Error> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {h({l})} {m}{n}",
        )))
        .build();
    let config = LogConfig::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info))
        .map_err(|e| format_err!("Invalid logging configuration: {}", e))?;
    log4rs::init_config(config).map_err(|e| format_err!("Logger already set: {}", e))?;
    Ok(())
}

fn run(config_path: &str) -> Result<(), Error> {
    let config = Config::load(config_path)?;
    let running = Arc::new(AtomicBool::new(true));
    let handler_flag = running.clone();
    ctrlc::set_handler(move || handler_flag.store(false, Ordering::SeqCst))
        .map_err(|e| format_err!("Unable to install the Ctrl-C handler: {}", e))?;

    let jenkins = Rc::new(JenkinsIntegration::from_config(&config));
    log_primary_view_summary(&jenkins);

    let mut registry = JobRegistry::new();
    let mut watcher = FinishedBuildWatcher::new();

    // Every tracker is validated and every job's history recorded before the
    // first trigger, so a bad retry count triggers nothing and old builds are
    // never mistaken for new ones.
    let mut campaigns = Vec::new();
    let mut known_builds = Vec::new();
    for tracked_job in &config.tracked_jobs {
        let job = jenkins.load_job(&tracked_job.url)?;
        known_builds.extend(jenkins.load_builds(&job.key())?);
        let tracked = factory::new_build_job(
            &job,
            &config,
            tracked_job.parameters.clone(),
            jenkins.clone(),
        )?;
        campaigns.push((job, &tracked_job.parameters, tracked));
    }
    watcher.observe(&known_builds);

    for (job, parameters, tracked) in campaigns {
        if !registry.trigger_and_register(&*jenkins, &job, parameters, tracked) {
            watcher.forget_job(job.url());
        }
    }

    let refresh_period = Duration::from_secs(config.job_refresh_period_secs);
    while !registry.is_empty() && sleep_while_running(&running, refresh_period) {
        let builds = load_tracked_builds(&jenkins, &registry);
        let finished = watcher.observe(&builds);
        if finished.is_empty() {
            continue;
        }

        for build in finished.values() {
            log_finished_build(build);
            if build.status != BuildStatus::Success {
                log_test_failures(&jenkins, build);
            }
        }

        for done in registry.on_new_finished_builds(&finished) {
            watcher.forget_job(&done.job().url);
            if done.passed_any_build() {
                info!("--Tracker--: {} passed, no longer tracking it.", done.job().name);
            } else {
                warn!(
                    "--Tracker--: {} failed on every retry, giving up.",
                    done.job().name
                );
                log_console_tail(&jenkins, &done);
            }
        }
        info!("--Tracker--: {} job(s) still tracked.", registry.len());
    }

    if !registry.is_empty() {
        info!(
            "--Tracker--: Stopped with {} job(s) still tracked.",
            registry.len()
        );
        if config.stop_builds_on_exit {
            stop_running_builds(&jenkins, &registry);
        }
    }
    Ok(())
}

fn stop_running_builds(jenkins: &JenkinsIntegration, registry: &JobRegistry) {
    for build in load_tracked_builds(jenkins, registry) {
        if !build.building {
            continue;
        }
        if let Err(e) = jenkins.stop_build(&build) {
            warn!("--Jenkins--: Failed to stop build {}. Details: {}", build.url, e);
        }
    }
}

fn log_test_failures(jenkins: &JenkinsIntegration, build: &Build) {
    let report = match jenkins.load_test_results(build) {
        Ok(report) => report,
        Err(e) => {
            debug!("--Jenkins--: No test report for {}. Details: {}", build.url, e);
            return;
        }
    };
    let failed = report.failed_cases();
    if failed.is_empty() {
        return;
    }
    warn!(
        "--Jenkins--: {} of {} tests failed in {}.",
        failed.len(),
        report.total_count(),
        build.url
    );
    for case in failed.iter().take(REPORTED_TEST_FAILURES) {
        warn!(
            "--Jenkins--:   {}.{}: {}",
            case.class_name,
            case.name,
            case.error_details.as_ref().map(String::as_str).unwrap_or("no details")
        );
    }
}

fn log_console_tail(jenkins: &JenkinsIntegration, done: &TrackedBuildJob) {
    let console = jenkins
        .load_job(&done.job().url)
        .and_then(|job| jenkins.load_console_text(&job));
    match console {
        Ok(Some(text)) => {
            let lines: Vec<&str> = text.lines().collect();
            let start = lines.len().saturating_sub(CONSOLE_TAIL_LINES);
            info!(
                "--Jenkins--: Console tail of {}:\n{}",
                done.job().name,
                lines[start..].join("\n")
            );
        }
        Ok(None) => {}
        Err(e) => debug!(
            "--Jenkins--: Unable to read the console of {}. Details: {}",
            done.job().name,
            e
        ),
    }
}

fn load_tracked_builds(jenkins: &JenkinsIntegration, registry: &JobRegistry) -> Vec<Build> {
    let mut builds = Vec::new();
    for url in registry.tracked_urls() {
        let job = match registry.get(&url) {
            Some(tracked) => tracked.job().clone(),
            None => continue,
        };
        match jenkins.load_builds(&job) {
            Ok(job_builds) => builds.extend(job_builds),
            Err(e) => warn!(
                "--Jenkins--: HTTP failure when attempting to get builds for job: {}. Error: {}",
                url, e
            ),
        }
    }
    builds
}

fn log_finished_build(build: &Build) {
    let started = build
        .started_at()
        .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "unknown".to_string());
    info!(
        "--Jenkins--: Build {} finished as {:?} (started {}, took {}s).",
        build.url,
        build.status,
        started,
        build.duration.unwrap_or(0) / 1000
    );
}

fn log_primary_view_summary(jenkins: &JenkinsIntegration) {
    let primary_view = match jenkins.load_workspace() {
        Ok(workspace) => workspace.primary_view,
        Err(e) => {
            warn!(
                "--Jenkins--: Failed to load the Jenkins workspace. Details: {}",
                e
            );
            return;
        }
    };
    let view_url = match primary_view {
        Some(view) => view.url,
        None => return,
    };
    match jenkins.load_view_jobs(&view_url) {
        Ok(elements) => {
            let summary = BuildStatusAggregator::from_elements(&elements);
            if summary.has_no_results() {
                info!("--Jenkins--: No job results in the primary view yet.");
            } else {
                info!(
                    "--Jenkins--: Primary view has {} jobs. {} succeeded, {} failed, {} unstable and {} aborted.",
                    summary.jobs, summary.succeeded, summary.broken, summary.unstable, summary.aborted
                );
            }
        }
        Err(e) => warn!(
            "--Jenkins--: Failed to retrieve the primary view jobs. Details: {}",
            e
        ),
    }
}

/// Sleeps for `period` unless Ctrl-C arrives first. Returns whether to keep going.
fn sleep_while_running(running: &AtomicBool, period: Duration) -> bool {
    let started = Instant::now();
    while running.load(Ordering::SeqCst) && started.elapsed() < period {
        thread::sleep(Duration::from_millis(SLEEP_STEP_MS));
    }
    running.load(Ordering::SeqCst)
}
