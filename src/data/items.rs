use crate::models::Role;

/// Item keys (OpenDota constants) that are standard purchases for a role
pub fn role_item_keys(role: Role) -> &'static [&'static str] {
    match role {
        Role::SafeLane => &[
            "power_treads",
            "bfury",
            "manta",
            "black_king_bar",
            "butterfly",
            "satanic",
        ],
        Role::Midlane => &[
            "bottle",
            "blink",
            "black_king_bar",
            "kaya",
            "orchid",
            "ultimate_scepter",
        ],
        Role::Offlane => &[
            "vanguard",
            "blink",
            "pipe",
            "crimson_guard",
            "black_king_bar",
            "heavens_halberd",
        ],
        Role::Support => &[
            "tranquil_boots",
            "glimmer_cape",
            "force_staff",
            "aether_lens",
            "blink",
        ],
        Role::HardSupport => &[
            "arcane_boots",
            "glimmer_cape",
            "force_staff",
            "ghost",
            "guardian_greaves",
        ],
    }
}
