#![no_main]

use std::collections::HashMap;

use libfuzzer_sys::fuzz_target;

use greedy_search::search;

// Input layout: `[nodes, goal, h_0, .., h_{nodes-1}, (from, to)*]`.
fuzz_target!(|data: &[u8]| {
    let [nodes, goal, rest @ ..] = data else {
        return;
    };
    let nodes = usize::from(*nodes % 32) + 1;
    let goal = usize::from(*goal) % nodes;
    if rest.len() < nodes {
        return;
    }
    let (h, edges) = rest.split_at(nodes);

    let mut graph = HashMap::<usize, Vec<usize>>::new();
    for e in edges.chunks_exact(2) {
        let from = usize::from(e[0]) % nodes;
        let to = usize::from(e[1]) % nodes;
        graph.entry(from).or_default().push(to);
    }

    let Some(path) = search(
        0usize,
        |s| f64::from(h[*s]) - 128.0,
        |s| *s == goal,
        |s| graph.get(s).cloned().unwrap_or_default(),
    ) else {
        return;
    };

    assert_eq!(path.first(), Some(&0));
    assert_eq!(path.last(), Some(&goal));
    for w in path.windows(2) {
        assert!(graph[&w[0]].contains(&w[1]));
    }
});
