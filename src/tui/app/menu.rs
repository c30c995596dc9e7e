use super::AppState;

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    RuleMode,
    DetectWins,
    Theme,
    QuickPickSeed,
}

const MENU_ITEMS: [MenuItem; 4] =
    [MenuItem::RuleMode, MenuItem::DetectWins, MenuItem::Theme, MenuItem::QuickPickSeed];

impl MenuItem {
    fn display(self, app: &AppState) -> String {
        match self {
            MenuItem::RuleMode => format!("Rule: {}", app.cfg_rule_mode.win_type()),
            MenuItem::DetectWins => {
                format!("Detect Wins: {}", if app.cfg_detect_wins { "On" } else { "Off" })
            }
            MenuItem::Theme => format!("Theme: {}", app.cfg_theme.label()),
            MenuItem::QuickPickSeed => format!("Quick Pick Seed: {}", app.cfg_seed),
        }
    }

    fn inc(self, app: &mut AppState) {
        match self {
            MenuItem::RuleMode => app.cfg_rule_mode = app.cfg_rule_mode.next(),
            MenuItem::DetectWins => app.cfg_detect_wins = !app.cfg_detect_wins,
            MenuItem::Theme => app.cfg_theme = app.cfg_theme.toggled(),
            MenuItem::QuickPickSeed => app.cfg_seed = app.cfg_seed.saturating_add(1),
        }
    }

    fn dec(self, app: &mut AppState) {
        match self {
            MenuItem::RuleMode => app.cfg_rule_mode = app.cfg_rule_mode.prev(),
            MenuItem::DetectWins => app.cfg_detect_wins = !app.cfg_detect_wins,
            MenuItem::Theme => app.cfg_theme = app.cfg_theme.toggled(),
            MenuItem::QuickPickSeed => app.cfg_seed = app.cfg_seed.saturating_sub(1),
        }
    }
}

impl AppState {
    pub fn menu_items_display(&self) -> Vec<String> {
        MENU_ITEMS.iter().map(|item| item.display(self)).collect()
    }

    pub fn toggle_menu(&mut self) {
        self.close_help();
        self.scene = match self.scene {
            super::Scene::Menu => super::Scene::Play,
            _ => {
                self.open_menu();
                super::Scene::Menu
            }
        };
    }

    // --- Menu operations ---
    pub fn open_menu(&mut self) {
        self.close_help();
        self.menu_index = 0;
        self.cfg_rule_mode = self.session.rule_mode;
        self.cfg_detect_wins = self.session.detect_wins;
        self.cfg_theme = self.theme;
        self.cfg_seed = self.next_seed;
        self.scene = super::Scene::Menu;
    }

    pub fn apply_menu(&mut self) {
        self.session.rule_mode = self.cfg_rule_mode;
        self.session.detect_wins = self.cfg_detect_wins;
        self.theme = self.cfg_theme;
        self.next_seed = self.cfg_seed;
        self.focus = self.focus.min(self.session.cards().len().saturating_sub(1));
        self.after_menu_apply();
        self.scene = super::Scene::Play;
    }

    pub fn cancel_menu(&mut self) {
        self.scene = super::Scene::Play;
    }

    pub fn menu_next(&mut self) {
        self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
    }
    pub fn menu_prev(&mut self) {
        self.menu_index = (self.menu_index + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
    }
    pub fn menu_inc(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.inc(self);
    }
    pub fn menu_dec(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.dec(self);
    }
}
