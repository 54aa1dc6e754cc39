/// Things that can open or close the mobile navigation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MenuEvent {
    Toggle,
    LinkClicked,
    ClickedOutside,
    Escape,
    Resized { viewport_width: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MobileMenu {
    open: bool,
    breakpoint: f64,
}

impl MobileMenu {
    pub fn new(breakpoint: f64) -> Self {
        Self { open: false, breakpoint }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns true when the menu changed and the classes need updating.
    pub fn handle(&mut self, event: MenuEvent) -> bool {
        let next = match event {
            MenuEvent::Toggle => !self.open,
            MenuEvent::LinkClicked | MenuEvent::ClickedOutside | MenuEvent::Escape => false,
            MenuEvent::Resized { viewport_width } if viewport_width >= self.breakpoint => false,
            MenuEvent::Resized { .. } => self.open,
        };
        let changed = next != self.open;
        self.open = next;
        changed
    }
}
