use crate::cli::CommonArgs;
use crate::loader::fetch_text;
use anyhow::Context;
use console::style;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

pub const DEFAULT_PROJECTS: &str = "lib/projects.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub year: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn string_or_number<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

impl Project {
    /// Every field value, newline-joined and lowercased, for free-text search.
    fn search_text(&self) -> String {
        let mut parts = vec![self.title.clone(), self.year.clone(), self.description.clone()];
        if let Some(image) = &self.image {
            parts.push(image.clone());
        }
        for value in self.extra.values() {
            match value {
                Value::String(s) => parts.push(s.clone()),
                other => parts.push(other.to_string()),
            }
        }
        parts.join("\n").to_lowercase()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProjectsDocument {
    List(Vec<Project>),
    Wrapped { projects: Vec<Project> },
}

pub fn parse_projects(text: &str) -> crate::error::Result<Vec<Project>> {
    Ok(match serde_json::from_str::<ProjectsDocument>(text)? {
        ProjectsDocument::List(projects) => projects,
        ProjectsDocument::Wrapped { projects } => projects,
    })
}

/// Project listing state: the loaded projects, the search query and the
/// selected year.
#[derive(Debug, Clone, Default)]
pub struct ProjectsPage {
    projects: Vec<Project>,
    query: String,
    year: Option<String>,
}

impl ProjectsPage {
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            projects,
            ..Self::default()
        }
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_lowercase();
    }

    /// Select a year, or clear the selection when the same year is chosen again.
    pub fn toggle_year(&mut self, year: &str) {
        if self.year.as_deref() == Some(year) {
            self.year = None;
        } else {
            self.year = Some(year.to_string());
        }
    }

    pub fn selected_year(&self) -> Option<&str> {
        self.year.as_deref()
    }

    pub fn filtered(&self) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|p| self.query.is_empty() || p.search_text().contains(&self.query))
            .filter(|p| self.year.as_deref().map_or(true, |y| p.year == y))
            .collect()
    }

    /// `(year, count)` over the filtered projects, first appearance first.
    pub fn year_rollup(&self) -> Vec<(String, usize)> {
        let mut rollup: Vec<(String, usize)> = Vec::new();
        for project in self.filtered() {
            match rollup.iter_mut().find(|(y, _)| *y == project.year) {
                Some((_, count)) => *count += 1,
                None => rollup.push((project.year.clone(), 1)),
            }
        }
        rollup
    }

    pub fn latest(&self, n: usize) -> &[Project] {
        &self.projects[..n.min(self.projects.len())]
    }
}

#[derive(Serialize)]
struct ProjectsOutput<'a> {
    version: u32,
    generated_at: chrono::DateTime<chrono::Utc>,
    source: &'a str,
    projects: Vec<&'a Project>,
    years: Vec<(String, usize)>,
}

pub struct ProjectsQuery {
    pub source: String,
    pub query: Option<String>,
    pub year: Option<String>,
    pub latest: Option<usize>,
    pub json: bool,
}

pub fn exec(common: CommonArgs, opts: ProjectsQuery) -> anyhow::Result<()> {
    let text = fetch_text(&opts.source, common.timeout.into(), !opts.json)
        .with_context(|| format!("Failed to load projects from {}", opts.source))?;
    let projects = parse_projects(&text).context("Failed to parse projects")?;
    debug!(count = projects.len(), "loaded projects");

    let mut page = ProjectsPage::new(projects);
    if let Some(n) = opts.latest {
        page = ProjectsPage::new(page.latest(n).to_vec());
    }
    if let Some(q) = opts.query.as_deref() {
        page.set_query(q);
    }
    if let Some(y) = opts.year.as_deref() {
        page.toggle_year(y);
    }

    let shown = page.filtered();
    let years = page.year_rollup();

    if opts.json {
        let output = ProjectsOutput {
            version: crate::model::SCHEMA_VERSION,
            generated_at: chrono::Utc::now(),
            source: &opts.source,
            projects: shown,
            years,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if shown.is_empty() {
        println!("No projects to display");
        return Ok(());
    }

    for project in &shown {
        println!("{}", style(&project.title).bold());
        if !project.year.is_empty() {
            println!("  {}", style(&project.year).dim());
        }
        if !project.description.is_empty() {
            println!("  {}", project.description);
        }
        println!();
    }

    println!("{}", style("By year").bold());
    for (year, count) in years {
        let marker = if page.selected_year() == Some(year.as_str()) { "◄" } else { "" };
        println!("  {year} ({count}) {marker}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DOC: &str = r#"{"projects": [
        {"title": "Lab 1", "year": "2024", "description": "Static portfolio", "image": "a.png"},
        {"title": "Weather", "year": 2023, "description": "D3 charts", "tags": ["viz"]},
        {"title": "Lab 3", "year": "2024", "description": "Fetching JSON"}
    ]}"#;

    #[test]
    fn parses_wrapped_and_bare_documents() {
        let wrapped = parse_projects(DOC).unwrap();
        assert_eq!(wrapped.len(), 3);
        assert_eq!(wrapped[1].year, "2023");
        let bare = parse_projects(r#"[{"title": "Only"}]"#).unwrap();
        assert_eq!(bare[0].title, "Only");
        assert_eq!(bare[0].year, "");
    }

    #[test]
    fn query_matches_any_value() {
        let mut page = ProjectsPage::new(parse_projects(DOC).unwrap());
        page.set_query("VIZ");
        let titles: Vec<&str> = page.filtered().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Weather"]);
        page.set_query("lab");
        assert_eq!(page.filtered().len(), 2);
    }

    #[test]
    fn year_selection_toggles() {
        let mut page = ProjectsPage::new(parse_projects(DOC).unwrap());
        assert_eq!(
            page.year_rollup(),
            vec![("2024".to_string(), 2), ("2023".to_string(), 1)]
        );
        page.toggle_year("2023");
        assert_eq!(page.filtered().len(), 1);
        page.toggle_year("2023");
        assert_eq!(page.selected_year(), None);
        assert_eq!(page.filtered().len(), 3);
    }

    #[test]
    fn latest_is_bounded() {
        let page = ProjectsPage::new(parse_projects(DOC).unwrap());
        assert_eq!(page.latest(2).len(), 2);
        assert_eq!(page.latest(10).len(), 3);
    }
}
