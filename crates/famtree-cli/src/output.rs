//! Plain-text and JSON renderings for the non-interactive commands.

use std::fmt::Write;

use chrono::{Local, NaiveDate};
use famtree_core::{
    Bounds, Connector, FamilySession, FamilyStore, FamilyTreeNode, Gender, Member, MemberId,
};
use serde::Serialize;

// =============================================================================
// JSON models
// =============================================================================

/// Full layout for `famtree tree --json`.
#[derive(Debug, Serialize)]
pub struct LayoutOutput<'a> {
    pub root: Option<&'a MemberId>,
    pub preset: &'static str,
    pub nodes: Vec<NodeOutput<'a>>,
    pub connectors: Vec<Connector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One placed member.
#[derive(Debug, Serialize)]
pub struct NodeOutput<'a> {
    pub id: &'a MemberId,
    pub name: &'a str,
    pub gender: Gender,
    pub level: usize,
    pub x: f64,
    pub y: f64,
}

pub fn layout_json(session: &FamilySession) -> Result<String, serde_json::Error> {
    let mut nodes = Vec::new();
    if let Some(tree) = session.tree() {
        collect_nodes(tree, session, &mut nodes);
    }

    let output = LayoutOutput {
        root: session.tree().map(FamilyTreeNode::id),
        preset: session.preset().display_name(),
        nodes,
        connectors: session.connectors(),
        bounds: session.positions().bounds(session.metrics()),
        error: session.tree_error().map(ToString::to_string),
    };
    serde_json::to_string_pretty(&output)
}

fn collect_nodes<'a>(
    node: &'a FamilyTreeNode,
    session: &FamilySession,
    out: &mut Vec<NodeOutput<'a>>,
) {
    // A member reached through a second parent is listed once, at its final
    // placement.
    if let Some(p) = session.positions().get(node.id()) {
        if !out.iter().any(|n| n.id == node.id()) {
            out.push(NodeOutput {
                id: node.id(),
                name: &node.member.name,
                gender: node.member.gender,
                level: node.level,
                x: p.x,
                y: p.y,
            });
        }
    }
    for child in &node.children {
        collect_nodes(child, session, out);
    }
}

// =============================================================================
// Text output
// =============================================================================

/// Indented outline of the current tree, one member per line.
pub fn tree_outline(session: &FamilySession) -> String {
    if let Some(err) = session.tree_error() {
        return format!("Tree unavailable: {}\n", err);
    }
    let Some(tree) = session.tree() else {
        return "No family members yet.\n".to_string();
    };

    let mut out = String::new();
    write_outline(tree, &mut out);
    out
}

fn write_outline(node: &FamilyTreeNode, out: &mut String) {
    let _ = writeln!(
        out,
        "{}{} ({}) {}",
        "  ".repeat(node.level),
        node.member.name,
        node.id(),
        lifespan(&node.member)
    );
    for child in &node.children {
        write_outline(child, out);
    }
}

pub fn member_list(store: &FamilyStore) -> String {
    let mut out = String::new();
    for member in store.all() {
        let root_marker = if store.root_id() == Some(&member.id) { "*" } else { " " };
        let _ = writeln!(
            out,
            "{} {:>4}  {:<20} {:<6} {}",
            root_marker,
            member.id,
            member.name,
            member.gender.display_name(),
            member.location.as_deref().unwrap_or("")
        );
    }
    out
}

/// Details of one member with their relatives, or `None` if unknown.
pub fn member_details(store: &FamilyStore, id: &MemberId) -> Option<String> {
    member_details_on(store, id, Local::now().date_naive())
}

pub fn member_details_on(store: &FamilyStore, id: &MemberId, today: NaiveDate) -> Option<String> {
    let member = store.get_by_id(id)?;
    let mut out = String::new();

    let _ = writeln!(out, "{} ({})", member.name, member.initials());
    let _ = writeln!(out, "  Id:       {}", member.id);
    let _ = writeln!(out, "  Gender:   {}", member.gender.display_name());
    if let Some(birth) = member.birth_date {
        let _ = writeln!(out, "  Born:     {}", birth.format("%Y-%m-%d"));
    }
    if let Some(death) = member.death_date {
        let _ = writeln!(out, "  Died:     {}", death.format("%Y-%m-%d"));
    }
    if let Some(age) = member.age_on(today) {
        let label = if member.is_living() { "Age" } else { "Aged" };
        let _ = writeln!(out, "  {:<9} {}", format!("{}:", label), age);
    }
    if let Some(location) = &member.location {
        let _ = writeln!(out, "  Location: {}", location);
    }
    if let Some(bio) = &member.bio {
        let _ = writeln!(out, "\n  {}", bio);
    }

    write_relatives(&mut out, "Parents", store.parents_of(id));
    write_relatives(&mut out, member.gender.spouses_label(), store.spouses_of(id));
    write_relatives(&mut out, "Children", store.children_of(id));
    write_relatives(&mut out, "Siblings", store.siblings_of(id));

    Some(out)
}

fn write_relatives(out: &mut String, heading: &str, relatives: Vec<&Member>) {
    if relatives.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n  {}:", heading);
    for relative in relatives {
        let _ = writeln!(out, "    - {} ({})", relative.name, relative.id);
    }
}

/// "1950-" or "1950-2020"; empty without a birth date.
fn lifespan(member: &Member) -> String {
    match (member.birth_date, member.death_date) {
        (Some(birth), Some(death)) => format!("{}-{}", birth.format("%Y"), death.format("%Y")),
        (Some(birth), None) => format!("{}-", birth.format("%Y")),
        _ => String::new(),
    }
}
