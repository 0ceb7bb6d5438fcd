use std::collections::{BTreeSet, HashSet};
use std::fmt::Write;

use crate::graph::NetDef;
use crate::util;

pub fn net_to_dot(net: &NetDef) -> String {
    let mut dot = String::from("digraph mace {\n");
    dot.push_str("  rankdir=LR;\n");
    dot.push_str("  node [fontname=\"Helvetica\"];\n");
    dot.push_str("  edge [fontname=\"Helvetica\"];\n");
    let mut graph_label = vec![net.name.clone()];
    if let Some(format) = util::data_format(net) {
        graph_label.push(format!("data format {:?}", format));
    }
    if let Some(format) = util::filter_format(net) {
        graph_label.push(format!("filter format {:?}", format));
    }
    let graph_label: Vec<_> = graph_label.into_iter().filter(|l| !l.is_empty()).collect();
    if !graph_label.is_empty() {
        let _ = writeln!(
            dot,
            "  labelloc=t;\n  label=\"{}\";",
            escape_label(&graph_label.join("\n"))
        );
    }
    dot.push('\n');

    let produced: HashSet<&str> = net
        .ops
        .iter()
        .flat_map(|op| op.outputs.iter().map(String::as_str))
        .collect();
    let external: BTreeSet<&str> = net
        .ops
        .iter()
        .flat_map(|op| op.inputs.iter().map(String::as_str))
        .filter(|tensor| !produced.contains(tensor))
        .collect();

    for tensor in &external {
        let _ = writeln!(
            dot,
            "  \"{}\" [shape=oval,style=filled,fillcolor=\"#d0e6ff\",label=\"{}\"];",
            escape_label(tensor),
            escape_label(tensor)
        );
    }
    if !external.is_empty() {
        dot.push('\n');
    }

    for (idx, op) in net.ops.iter().enumerate() {
        let node_id = format!("op_{}", idx);
        let mut label_lines = vec![format!("{} (#{})", op.name, idx), op.op_type.to_string()];
        if let Some(format) = util::data_format(op) {
            label_lines.push(format!("{:?}", format));
        }
        if let Some(shape) = op.output_shapes.first() {
            label_lines.push(format_shape(shape));
        }
        let label = escape_label(&label_lines.join("\n"));
        let _ = writeln!(
            dot,
            "  {} [shape=box,style=rounded,label=\"{}\"];",
            node_id, label
        );

        for (input_idx, tensor) in op.inputs.iter().enumerate() {
            let source = match net
                .ops
                .iter()
                .position(|other| other.outputs.iter().any(|out| out == tensor))
            {
                Some(producer) => format!("op_{}", producer),
                None => format!("\"{}\"", escape_label(tensor)),
            };
            let _ = writeln!(
                dot,
                "  {} -> {} [label=\"in{}\"];",
                source, node_id, input_idx
            );
        }
    }

    dot.push_str("}\n");
    dot
}

fn escape_label(label: &str) -> String {
    label
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

fn format_shape(shape: &[i64]) -> String {
    if shape.is_empty() {
        "scalar".to_string()
    } else {
        shape
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("x")
    }
}
