//! Push, tag and commit lines.
//!
//! [`plan`] decides what an event is worth reporting. [`format_event`] turns
//! that decision into a lazy [`Lines`] iterator; [`render`] does the same after
//! shortening the one link the summary line carries.
//!
//! Output shapes (colours omitted):
//!
//! ```text
//! [proj] alice tagged deadbee as v1.0 https://git.io/x
//! [proj] alice pushed 2 commits to main [+1/-0/±3] https://git.io/y
//! [proj] alice abcdef0 - fix bug
//! ```

use std::iter::FusedIterator;

use crate::shortener::LinkShortener;
use crate::types::{CommitInfo, Event, HookConfig, Sha};

use super::line::{FormattedLine, MAX_FIELD_LEN, clean_field, clean_link, commit_subject};
use super::palette::Palette;

/// The summary line an event produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Summary {
    /// A tag push without commits: one tag line and nothing else.
    Tag,
    /// A push with commits: a push line followed by one line per commit.
    Push,
}

impl Summary {
    /// Returns the URL the summary line links to, if the event has one.
    pub fn link(self, event: &Event) -> Option<&str> {
        match self {
            Summary::Tag => event.repository.head_commit_url.as_deref(),
            Summary::Push => event.repository.compare_url.as_deref(),
        }
    }
}

/// Decides what to report for an event under a hook configuration.
///
/// - No repository name: nothing (the payload is too incomplete to label).
/// - No commits: a tag line if tags are shown, the ref is a tag and the tagged
///   commit has a displayable SHA; otherwise nothing.
/// - Commits on a branch the filter does not allow: nothing. Tags are not
///   filtered.
/// - Otherwise: a push summary followed by the commits.
pub fn plan(event: &Event, config: &HookConfig) -> Option<Summary> {
    event.repository.name.as_ref()?;

    if event.commits.is_empty() {
        let tagged_commit_known = event
            .repository
            .head_commit_sha
            .as_ref()
            .and_then(short_sha)
            .is_some();
        return (config.show_tags && event.tag().is_some() && tagged_commit_known)
            .then_some(Summary::Tag);
    }

    if let Some(branch) = event.branch()
        && !config.branch_filter.allows(branch)
    {
        return None;
    }

    Some(Summary::Push)
}

/// Builds the lines for an event, using `link` as the summary link.
///
/// `link` is normally the shortened form of [`Summary::link`]; passing the
/// original URL (or `None`) is always valid.
pub fn format_event(
    event: Event,
    config: &HookConfig,
    palette: Palette,
    link: Option<String>,
) -> Lines {
    let project = event
        .project_label(config.full_project_name)
        .and_then(|label| clean_field(&label, MAX_FIELD_LEN));

    let (summary, project) = match (plan(&event, config), project) {
        (Some(summary), Some(project)) => (Some(summary), project),
        _ => return Lines::empty(),
    };

    Lines {
        painter: LinePainter {
            palette,
            config: config.clone(),
            project,
            link: link.as_deref().and_then(clean_link),
        },
        event,
        summary,
        cursor: Cursor::Summary,
    }
}

/// Shortens the summary link through `shortener`, then builds the lines.
///
/// The shortener is only called when a summary line will actually be
/// produced, so suppressed events cost no network round trip.
pub async fn render<S: LinkShortener + Sync>(
    event: Event,
    config: &HookConfig,
    palette: Palette,
    shortener: &S,
) -> Lines {
    let link = match plan(&event, config).and_then(|summary| summary.link(&event)) {
        Some(url) => Some(shortener.shorten(url).await),
        None => None,
    };
    format_event(event, config, palette, link)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Summary,
    Commit(usize),
    Done,
}

/// The formatted lines of one event, produced on demand.
///
/// Yields the summary line first, then (for pushes) one line per commit in
/// payload order. Single pass.
#[derive(Debug, Clone)]
pub struct Lines {
    painter: LinePainter,
    event: Event,
    summary: Option<Summary>,
    cursor: Cursor,
}

impl Lines {
    /// An iterator that yields nothing.
    pub fn empty() -> Self {
        Lines {
            painter: LinePainter {
                palette: Palette::DEFAULT,
                config: HookConfig::default(),
                project: String::new(),
                link: None,
            },
            event: Event::default(),
            summary: None,
            cursor: Cursor::Done,
        }
    }

    /// Returns the kind of summary these lines start with.
    pub fn summary(&self) -> Option<Summary> {
        self.summary
    }

    fn remaining(&self) -> usize {
        match (self.cursor, self.summary) {
            (Cursor::Done, _) | (_, None) => 0,
            (Cursor::Summary, Some(Summary::Tag)) => 1,
            (Cursor::Summary, Some(Summary::Push)) => 1 + self.event.commits.len(),
            (Cursor::Commit(i), _) => self.event.commits.len().saturating_sub(i),
        }
    }
}

impl Iterator for Lines {
    type Item = FormattedLine;

    fn next(&mut self) -> Option<FormattedLine> {
        let summary = self.summary?;
        let text = match self.cursor {
            Cursor::Done => return None,
            Cursor::Summary => {
                self.cursor = match summary {
                    Summary::Tag => Cursor::Done,
                    Summary::Push => Cursor::Commit(0),
                };
                match summary {
                    Summary::Tag => self.painter.tag_summary(&self.event),
                    Summary::Push => self.painter.push_summary(&self.event),
                }
            }
            Cursor::Commit(i) => match self.event.commits.get(i) {
                Some(commit) => {
                    self.cursor = Cursor::Commit(i + 1);
                    self.painter.commit_line(commit, &self.event)
                }
                None => {
                    self.cursor = Cursor::Done;
                    return None;
                }
            },
        };

        Some(FormattedLine::new(text, self.painter.config.strip_colors()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for Lines {}

impl FusedIterator for Lines {}

/// Everything the line builders share for one event.
#[derive(Debug, Clone)]
struct LinePainter {
    palette: Palette,
    config: HookConfig,
    /// Already cleaned.
    project: String,
    /// Already cleaned.
    link: Option<String>,
}

impl LinePainter {
    fn tag_summary(&self, event: &Event) -> String {
        let p = &self.palette;
        let mut line = vec![p.project(&self.project)];

        match clean_name(event.pusher_name.as_deref()) {
            Some(pusher) => line.push(format!("{} tagged", p.person(&pusher))),
            None => line.push("Tagged".to_string()),
        }

        let sha = event
            .repository
            .head_commit_sha
            .as_ref()
            .and_then(short_sha)
            .unwrap_or_default();
        line.push(format!("{} as", p.highlight(&sha)));

        if let Some(tag) = clean_name(event.tag()) {
            line.push(p.highlight(&tag));
        }

        if let Some(link) = &self.link {
            line.push(p.link(link));
        }

        line.join(" ")
    }

    fn push_summary(&self, event: &Event) -> String {
        let p = &self.palette;
        let mut line = vec![p.project(&self.project)];

        if let Some(pusher) = clean_name(event.pusher_name.as_deref()) {
            line.push(format!("{} pushed", p.person(&pusher)));
        }

        let count = event.commits.len();
        let noun = if count == 1 { "commit" } else { "commits" };
        line.push(format!("{} {}", p.highlight(&count.to_string()), noun));

        if self.config.show_branch
            && let Some(branch) = clean_name(event.branch())
        {
            line.push(format!("to {}", p.highlight(&branch)));
        }

        let files = &event.file_changes;
        line.push(format!(
            "[+{}/-{}/\u{00B1}{}]",
            files.added.len(),
            files.removed.len(),
            files.modified.len()
        ));

        if let Some(link) = &self.link {
            line.push(p.link(link));
        }

        line.join(" ")
    }

    fn commit_line(&self, commit: &CommitInfo, event: &Event) -> String {
        let p = &self.palette;
        let mut line = vec![p.project(&self.project)];

        let who = attribution(commit, event.pusher_name.as_deref(), self.config.prefer_username);
        if let Some(who) = who {
            line.push(p.person(&who));
        }

        if let Some(sha) = short_sha(&commit.sha) {
            line.push(p.highlight(&sha));
        }

        line.push("-".to_string());
        line.push(commit_subject(&commit.message));

        line.join(" ")
    }
}

/// Picks who a commit line is attributed to.
///
/// Username (only when preferred), then author name, then committer name,
/// then the pusher. Candidates that clean down to nothing are skipped.
///
/// The pusher is a deliberate last resort: GitHub sends commits without an
/// author object, and those must still read `[proj] alice abcdef0 - fix bug`
/// rather than losing the name.
fn attribution(commit: &CommitInfo, pusher: Option<&str>, prefer_username: bool) -> Option<String> {
    let username = commit.author_username.as_deref().filter(|_| prefer_username);

    [
        username,
        commit.author_name.as_deref(),
        commit.committer_name.as_deref(),
        pusher,
    ]
    .into_iter()
    .find_map(clean_name)
}

/// The abbreviated SHA as displayed, or `None` if nothing printable is left.
fn short_sha(sha: &Sha) -> Option<String> {
    clean_field(sha.short(), MAX_FIELD_LEN)
}

fn clean_name(name: Option<&str>) -> Option<String> {
    name.and_then(|n| clean_field(n, MAX_FIELD_LEN))
}
