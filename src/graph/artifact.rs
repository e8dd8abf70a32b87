// Graph artifact IO
//
// Two interchange formats are supported, chosen by file extension:
// - `.json`: node-link document (`nodes` + `edges`, `links` accepted on read)
// - `.gexf`: GEXF 1.2 with a `type` node attribute, as read by Gephi

use super::{NavigationGraph, NodeKind};
use crate::error::{AnalysisError, AnalysisResult};
use miette::{IntoDiagnostic, Result, WrapErr};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

const GEXF_NAMESPACE: &str = "http://www.gexf.net/1.2draft";
const TYPE_ATTRIBUTE_ID: &str = "0";

/// Serialization format of a graph artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Json,
    Gexf,
}

impl ArtifactFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(ArtifactFormat::Json),
            "gexf" => Some(ArtifactFormat::Gexf),
            _ => None,
        }
    }

    /// Guess the format from content when the extension is not conclusive
    fn sniff(content: &str) -> Self {
        if content.trim_start().starts_with('<') {
            ArtifactFormat::Gexf
        } else {
            ArtifactFormat::Json
        }
    }
}

/// Load a previously exported graph
pub fn load_graph(path: &Path) -> AnalysisResult<NavigationGraph> {
    if !path.is_file() {
        return Err(AnalysisError::MissingGraphArtifact(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|source| AnalysisError::GraphArtifactUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let format = ArtifactFormat::from_path(path).unwrap_or_else(|| ArtifactFormat::sniff(&content));

    let graph = match format {
        ArtifactFormat::Json => parse_json(&content),
        ArtifactFormat::Gexf => parse_gexf(&content),
    }
    .map_err(|message| AnalysisError::GraphArtifactInvalid {
        path: path.to_path_buf(),
        message,
    })?;

    info!(
        "Loaded graph from {}: {} nodes, {} edges",
        path.display(),
        graph.node_count(),
        graph.edge_count()
    );

    Ok(graph)
}

/// Write the graph in the format implied by the path's extension (JSON if unknown)
pub fn save_graph(graph: &NavigationGraph, path: &Path) -> Result<()> {
    let content = match ArtifactFormat::from_path(path).unwrap_or(ArtifactFormat::Json) {
        ArtifactFormat::Json => to_json(graph)?,
        ArtifactFormat::Gexf => to_gexf(graph)?,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).into_diagnostic()?;
    }

    fs::write(path, content)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to write graph to {}", path.display()))?;

    info!("Graph exported to {}", path.display());
    Ok(())
}

#[derive(Debug, Serialize, Deserialize)]
struct NodeLinkDocument {
    #[serde(default = "default_directed")]
    directed: bool,
    #[serde(default)]
    nodes: Vec<NodeLinkNode>,
    #[serde(default, alias = "links")]
    edges: Vec<NodeLinkEdge>,
}

#[derive(Debug, Serialize, Deserialize)]
struct NodeLinkNode {
    id: serde_json::Value,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct NodeLinkEdge {
    source: serde_json::Value,
    target: serde_json::Value,
}

fn default_directed() -> bool {
    true
}

/// Node ids may be any JSON scalar; strings are taken verbatim
fn id_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn to_json(graph: &NavigationGraph) -> Result<String> {
    let document = NodeLinkDocument {
        directed: true,
        nodes: graph
            .graph_nodes()
            .map(|node| NodeLinkNode {
                id: serde_json::Value::String(node.key.clone()),
                kind: node.kind.map(|k| k.type_name().to_string()),
            })
            .collect(),
        edges: graph
            .edges()
            .map(|(source, target)| NodeLinkEdge {
                source: serde_json::Value::String(source.to_string()),
                target: serde_json::Value::String(target.to_string()),
            })
            .collect(),
    };

    serde_json::to_string_pretty(&document).into_diagnostic()
}

fn parse_json(content: &str) -> std::result::Result<NavigationGraph, String> {
    let document: NodeLinkDocument = serde_json::from_str(content).map_err(|e| e.to_string())?;

    if !document.directed {
        debug!("Graph artifact is marked undirected; edges are read as directed");
    }

    let mut graph = NavigationGraph::new();
    for node in &document.nodes {
        let kind = node.kind.as_deref().and_then(NodeKind::from_type_name);
        graph.add_node(&id_text(&node.id), kind);
    }
    for edge in &document.edges {
        let source = id_text(&edge.source);
        let target = id_text(&edge.target);
        // Node-link allows edges to name nodes that were never listed
        graph.add_node(&source, None);
        graph.add_node(&target, None);
        graph.add_edge(&source, &target);
    }

    Ok(graph)
}

fn to_gexf(graph: &NavigationGraph) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .into_diagnostic()?;

    let mut gexf = BytesStart::new("gexf");
    gexf.push_attribute(("xmlns", GEXF_NAMESPACE));
    gexf.push_attribute(("version", "1.2"));
    writer.write_event(Event::Start(gexf)).into_diagnostic()?;

    let mut graph_el = BytesStart::new("graph");
    graph_el.push_attribute(("defaultedgetype", "directed"));
    graph_el.push_attribute(("mode", "static"));
    writer.write_event(Event::Start(graph_el)).into_diagnostic()?;

    let mut attributes = BytesStart::new("attributes");
    attributes.push_attribute(("class", "node"));
    attributes.push_attribute(("mode", "static"));
    writer.write_event(Event::Start(attributes)).into_diagnostic()?;
    let mut attribute = BytesStart::new("attribute");
    attribute.push_attribute(("id", TYPE_ATTRIBUTE_ID));
    attribute.push_attribute(("title", "type"));
    attribute.push_attribute(("type", "string"));
    writer.write_event(Event::Empty(attribute)).into_diagnostic()?;
    writer
        .write_event(Event::End(BytesEnd::new("attributes")))
        .into_diagnostic()?;

    writer
        .write_event(Event::Start(BytesStart::new("nodes")))
        .into_diagnostic()?;
    for node in graph.graph_nodes() {
        let mut el = BytesStart::new("node");
        el.push_attribute(("id", node.key.as_str()));
        el.push_attribute(("label", node.key.as_str()));

        match node.kind {
            Some(kind) => {
                writer.write_event(Event::Start(el)).into_diagnostic()?;
                writer
                    .write_event(Event::Start(BytesStart::new("attvalues")))
                    .into_diagnostic()?;
                let mut value = BytesStart::new("attvalue");
                value.push_attribute(("for", TYPE_ATTRIBUTE_ID));
                value.push_attribute(("value", kind.type_name()));
                writer.write_event(Event::Empty(value)).into_diagnostic()?;
                writer
                    .write_event(Event::End(BytesEnd::new("attvalues")))
                    .into_diagnostic()?;
                writer
                    .write_event(Event::End(BytesEnd::new("node")))
                    .into_diagnostic()?;
            }
            None => writer.write_event(Event::Empty(el)).into_diagnostic()?,
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new("nodes")))
        .into_diagnostic()?;

    writer
        .write_event(Event::Start(BytesStart::new("edges")))
        .into_diagnostic()?;
    for (index, (source, target)) in graph.edges().enumerate() {
        let id = index.to_string();
        let mut el = BytesStart::new("edge");
        el.push_attribute(("id", id.as_str()));
        el.push_attribute(("source", source));
        el.push_attribute(("target", target));
        writer.write_event(Event::Empty(el)).into_diagnostic()?;
    }
    writer
        .write_event(Event::End(BytesEnd::new("edges")))
        .into_diagnostic()?;

    writer
        .write_event(Event::End(BytesEnd::new("graph")))
        .into_diagnostic()?;
    writer
        .write_event(Event::End(BytesEnd::new("gexf")))
        .into_diagnostic()?;

    String::from_utf8(writer.into_inner()).into_diagnostic()
}

fn attribute_map(e: &BytesStart<'_>) -> std::result::Result<HashMap<String, String>, String> {
    let mut map = HashMap::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr.unescape_value().map_err(|e| e.to_string())?;
        map.insert(key, value.into_owned());
    }
    Ok(map)
}

/// Element state collected while streaming a GEXF document
#[derive(Default)]
struct GexfState {
    saw_root: bool,
    in_node_attributes: bool,
    type_attribute: Option<String>,
    current_node: Option<usize>,
    // Nodes are keyed by label when present; edges refer to node ids
    labels: HashMap<String, String>,
    pending_nodes: Vec<(String, Option<NodeKind>)>,
    edges: Vec<(String, String)>,
}

impl GexfState {
    fn open(&mut self, e: &BytesStart<'_>, self_closing: bool) -> std::result::Result<(), String> {
        match e.name().as_ref() {
            b"gexf" => self.saw_root = true,
            b"attributes" => {
                let attrs = attribute_map(e)?;
                self.in_node_attributes =
                    !self_closing && attrs.get("class").map(String::as_str) == Some("node");
            }
            b"attribute" if self.in_node_attributes => {
                let attrs = attribute_map(e)?;
                if attrs.get("title").map(String::as_str) == Some("type") {
                    self.type_attribute = attrs.get("id").cloned();
                }
            }
            b"node" => {
                let attrs = attribute_map(e)?;
                let id = attrs
                    .get("id")
                    .cloned()
                    .ok_or_else(|| "node without id".to_string())?;
                let label = attrs.get("label").cloned().unwrap_or_else(|| id.clone());
                self.labels.insert(id, label.clone());
                self.pending_nodes.push((label, None));
                // A self-closing node has no attvalues of its own
                self.current_node = if self_closing {
                    None
                } else {
                    Some(self.pending_nodes.len() - 1)
                };
            }
            b"attvalue" => {
                let attrs = attribute_map(e)?;
                let is_type = match (&self.type_attribute, attrs.get("for")) {
                    (Some(expected), Some(found)) => expected == found,
                    (None, Some(found)) => found == "type",
                    _ => false,
                };
                if let (true, Some(index), Some(value)) =
                    (is_type, self.current_node, attrs.get("value"))
                {
                    self.pending_nodes[index].1 = NodeKind::from_type_name(value);
                }
            }
            b"edge" => {
                let attrs = attribute_map(e)?;
                match (attrs.get("source"), attrs.get("target")) {
                    (Some(source), Some(target)) => {
                        self.edges.push((source.clone(), target.clone()));
                    }
                    _ => return Err("edge without source or target".to_string()),
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"node" => self.current_node = None,
            b"attributes" => self.in_node_attributes = false,
            _ => {}
        }
    }
}

fn parse_gexf(content: &str) -> std::result::Result<NavigationGraph, String> {
    let mut reader = Reader::from_str(content);
    reader.trim_text(true);

    let mut state = GexfState::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => state.open(e, false)?,
            Ok(Event::Empty(ref e)) => state.open(e, true)?,
            Ok(Event::End(ref e)) => state.close(e.name().as_ref()),
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(format!(
                    "XML error at position {}: {}",
                    reader.buffer_position(),
                    e
                ))
            }
            _ => {}
        }
        buf.clear();
    }

    if !state.saw_root {
        return Err("missing <gexf> root element".to_string());
    }

    let GexfState {
        labels,
        pending_nodes,
        edges,
        ..
    } = state;

    let mut graph = NavigationGraph::new();
    for (key, kind) in &pending_nodes {
        graph.add_node(key, *kind);
    }
    for (source, target) in &edges {
        let source = labels.get(source).cloned().unwrap_or_else(|| source.clone());
        let target = labels.get(target).cloned().unwrap_or_else(|| target.clone());
        graph.add_node(&source, None);
        graph.add_node(&target, None);
        graph.add_edge(&source, &target);
    }

    Ok(graph)
}
