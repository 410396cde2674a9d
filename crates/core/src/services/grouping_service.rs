use crate::models::group::ShopGroup;
use crate::models::line::CartLine;

/// Partitions cart lines by owning shop for per-vendor checkout.
///
/// Pure business logic — no I/O, no API calls. Easy to test.
pub struct GroupingService;

impl GroupingService {
    pub fn new() -> Self {
        Self
    }

    /// Group lines by shop, each group carrying its own subtotal.
    ///
    /// Groups appear in first-occurrence order of their shop while scanning
    /// the lines — not sorted — so the projection is deterministic and stable
    /// for the UI. Every line lands in exactly one group and no group is
    /// empty; an empty cart yields no groups.
    pub fn group_by_shop<'a>(&self, lines: &'a [CartLine]) -> Vec<ShopGroup<'a>> {
        let mut groups: Vec<ShopGroup<'a>> = Vec::new();

        for line in lines {
            match groups.iter_mut().find(|g| g.shop_id == line.shop_id) {
                Some(group) => {
                    group.lines.push(line);
                    group.subtotal += line.line_total();
                }
                None => {
                    groups.push(ShopGroup {
                        shop_id: &line.shop_id,
                        lines: vec![line],
                        subtotal: line.line_total(),
                    });
                }
            }
        }

        groups
    }
}

impl Default for GroupingService {
    fn default() -> Self {
        Self::new()
    }
}
