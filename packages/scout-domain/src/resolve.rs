use std::collections::HashSet;

/// The only identity an assessment keeps across parsing stages.
pub fn normalize_name(name: &str) -> String {
	name.trim().to_lowercase()
}

/// Resolves parsed names against the candidate pool, returning pool indices
/// in ranked order. Matching is exact on normalized names first, then
/// substring containment in either direction; both passes scan the pool in
/// its given (retrieval) order, so ambiguous matches resolve
/// deterministically. A name that matches nothing contributes no index, and
/// no normalized name is ever selected twice.
pub fn resolve_ranked(names: &[String], pool: &[String]) -> Vec<usize> {
	let normalized_pool: Vec<String> = pool.iter().map(|name| normalize_name(name)).collect();
	let mut taken: HashSet<String> = HashSet::new();
	let mut ranked = Vec::new();

	for name in names {
		let wanted = normalize_name(name);

		if wanted.is_empty() {
			continue;
		}

		let exact = normalized_pool
			.iter()
			.enumerate()
			.filter(|(_, pool_name)| !taken.contains(*pool_name))
			.find(|(_, pool_name)| **pool_name == wanted);
		let hit = exact.or_else(|| {
			normalized_pool
				.iter()
				.enumerate()
				.filter(|(_, pool_name)| !taken.contains(*pool_name))
				.find(|(_, pool_name)| {
					pool_name.contains(&wanted) || wanted.contains(pool_name.as_str())
				})
		});

		if let Some((index, pool_name)) = hit {
			taken.insert(pool_name.clone());
			ranked.push(index);
		}
	}

	ranked
}
