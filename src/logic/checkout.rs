//! Checkout advisor: canonical double-out finishes for 2..=170.

/// Highest score that can be finished with three darts.
pub const MAX_CHECKOUT: u32 = 170;

/// Finish for each finishable score, sorted by score. Scores with no three-dart double-out
/// (159, 162, 163, 165, 166, 168, 169) are absent.
static CHECKOUTS: [(u32, &str); 162] = [
    (2, "D1"),
    (3, "1, D1"),
    (4, "D2"),
    (5, "1, D2"),
    (6, "D3"),
    (7, "1, D3"),
    (8, "D4"),
    (9, "1, D4"),
    (10, "D5"),
    (11, "1, D5"),
    (12, "D6"),
    (13, "1, D6"),
    (14, "D7"),
    (15, "1, D7"),
    (16, "D8"),
    (17, "1, D8"),
    (18, "D9"),
    (19, "3, D8"),
    (20, "D10"),
    (21, "1, D10"),
    (22, "D11"),
    (23, "3, D10"),
    (24, "D12"),
    (25, "1, D12"),
    (26, "D13"),
    (27, "3, D12"),
    (28, "D14"),
    (29, "5, D12"),
    (30, "D15"),
    (31, "7, D12"),
    (32, "D16"),
    (33, "1, D16"),
    (34, "D17"),
    (35, "3, D16"),
    (36, "D18"),
    (37, "5, D16"),
    (38, "D19"),
    (39, "7, D16"),
    (40, "D20"),
    (41, "1, D20"),
    (42, "2, D20"),
    (43, "3, D20"),
    (44, "4, D20"),
    (45, "5, D20"),
    (46, "6, D20"),
    (47, "7, D20"),
    (48, "8, D20"),
    (49, "9, D20"),
    (50, "Bull"),
    (51, "11, D20"),
    (52, "12, D20"),
    (53, "13, D20"),
    (54, "14, D20"),
    (55, "15, D20"),
    (56, "16, D20"),
    (57, "17, D20"),
    (58, "18, D20"),
    (59, "19, D20"),
    (60, "20, D20"),
    (61, "25, D18"),
    (62, "T10, D16"),
    (63, "T13, D12"),
    (64, "T16, D8"),
    (65, "25, D20"),
    (66, "T10, D18"),
    (67, "T17, D8"),
    (68, "T12, D16"),
    (69, "T11, D18"),
    (70, "T10, D20"),
    (71, "T13, D16"),
    (72, "T12, D18"),
    (73, "T11, D20"),
    (74, "T14, D16"),
    (75, "T13, D18"),
    (76, "T12, D20"),
    (77, "T15, D16"),
    (78, "T14, D18"),
    (79, "T13, D20"),
    (80, "T16, D16"),
    (81, "T15, D18"),
    (82, "T14, D20"),
    (83, "T17, D16"),
    (84, "T16, D18"),
    (85, "T15, D20"),
    (86, "T18, D16"),
    (87, "T17, D18"),
    (88, "T16, D20"),
    (89, "T19, D16"),
    (90, "T18, D18"),
    (91, "T17, D20"),
    (92, "T20, D16"),
    (93, "T19, D18"),
    (94, "T18, D20"),
    (95, "T19, D19"),
    (96, "T20, D18"),
    (97, "T19, D20"),
    (98, "T20, D19"),
    (99, "T20, 7, D16"),
    (100, "T20, D20"),
    (101, "T17, Bull"),
    (102, "T20, 2, D20"),
    (103, "T20, 3, D20"),
    (104, "T18, Bull"),
    (105, "T20, 5, D20"),
    (106, "T20, 6, D20"),
    (107, "T19, Bull"),
    (108, "T20, 8, D20"),
    (109, "T20, 9, D20"),
    (110, "T20, Bull"),
    (111, "T20, 11, D20"),
    (112, "T20, 12, D20"),
    (113, "T20, 13, D20"),
    (114, "T20, 14, D20"),
    (115, "T20, 15, D20"),
    (116, "T20, 16, D20"),
    (117, "T20, 17, D20"),
    (118, "T20, 18, D20"),
    (119, "T20, 19, D20"),
    (120, "T20, 20, D20"),
    (121, "T20, 25, D18"),
    (122, "T19, 25, D20"),
    (123, "T20, T13, D12"),
    (124, "T20, T16, D8"),
    (125, "T20, 25, D20"),
    (126, "T20, T10, D18"),
    (127, "T20, T17, D8"),
    (128, "T20, T12, D16"),
    (129, "T20, T11, D18"),
    (130, "T20, T10, D20"),
    (131, "T20, T13, D16"),
    (132, "T20, T12, D18"),
    (133, "T20, T11, D20"),
    (134, "T20, T14, D16"),
    (135, "T20, T13, D18"),
    (136, "T20, T12, D20"),
    (137, "T20, T15, D16"),
    (138, "T20, T14, D18"),
    (139, "T20, T13, D20"),
    (140, "T20, T16, D16"),
    (141, "T20, T15, D18"),
    (142, "T20, T14, D20"),
    (143, "T20, T17, D16"),
    (144, "T20, T16, D18"),
    (145, "T20, T15, D20"),
    (146, "T20, T18, D16"),
    (147, "T20, T17, D18"),
    (148, "T20, T16, D20"),
    (149, "T20, T19, D16"),
    (150, "T20, T18, D18"),
    (151, "T20, T17, D20"),
    (152, "T20, T20, D16"),
    (153, "T20, T19, D18"),
    (154, "T20, T18, D20"),
    (155, "T20, T19, D19"),
    (156, "T20, T20, D18"),
    (157, "T20, T19, D20"),
    (158, "T20, T20, D19"),
    (160, "T20, T20, D20"),
    (161, "T20, T17, Bull"),
    (164, "T20, T18, Bull"),
    (167, "T20, T19, Bull"),
    (170, "T20, T20, Bull"),
];

/// Suggested finish for `remaining`, or None if it cannot be finished in three darts.
///
/// Never suggests anything below 2: zero is already a win and one is a bust.
pub fn suggest_checkout(remaining: u32) -> Option<&'static str> {
    if !(2..=MAX_CHECKOUT).contains(&remaining) {
        return None;
    }
    CHECKOUTS
        .binary_search_by_key(&remaining, |(score, _)| *score)
        .ok()
        .map(|i| CHECKOUTS[i].1)
}
