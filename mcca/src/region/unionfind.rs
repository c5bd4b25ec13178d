/// Size-weighted union-find (disjoint-set) with full path compression.
///
/// Every element starts as its own root with size 1. `size` is only
/// meaningful at roots.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<u32>,
    size: Vec<u32>,
}

impl UnionFind {
    /// Create a new union-find with `n` singleton sets.
    ///
    /// # Panics
    ///
    /// Elements are indexed by `u32`; panics if `n` exceeds `u32::MAX`.
    pub fn new(n: usize) -> Self {
        assert!(
            u32::try_from(n).is_ok(),
            "union-find holds at most {} elements, got {n}",
            u32::MAX
        );
        Self {
            parent: (0..n as u32).collect(),
            size: vec![1; n],
        }
    }

    /// Find the representative of the set containing `id`.
    ///
    /// Two passes: walk to the root, then point every node on the path
    /// directly at it.
    pub fn find(&mut self, id: u32) -> u32 {
        let mut root = id;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }

        let mut cur = id;
        while self.parent[cur as usize] != root {
            let next = self.parent[cur as usize];
            self.parent[cur as usize] = root;
            cur = next;
        }
        root
    }

    /// Union the sets containing `a` and `b`. Returns the new representative.
    ///
    /// The smaller set is attached under the larger one; on equal sizes the
    /// root of `a` stays root.
    pub fn unite(&mut self, a: u32, b: u32) -> u32 {
        let mut ra = self.find(a);
        let mut rb = self.find(b);
        if ra == rb {
            return ra;
        }
        if self.size[ra as usize] < self.size[rb as usize] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb as usize] = ra;
        self.size[ra as usize] += self.size[rb as usize];
        ra
    }

    /// Size of the set containing `id` (including `id` itself).
    pub fn set_size(&mut self, id: u32) -> u32 {
        let r = self.find(id);
        self.size[r as usize]
    }

    /// Compress every path and return the root of each element.
    pub fn flatten(&mut self) -> Vec<u32> {
        (0..self.parent.len() as u32).map(|i| self.find(i)).collect()
    }
}
