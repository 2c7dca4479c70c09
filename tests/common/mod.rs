//! Shared helpers for integration tests.

#![allow(dead_code)]

use spark_compositor::{
    LayoutKind, Lines, RenderError, Scalar, Segment, Size, Style, Styles, Widget, WidgetId,
    WidgetTree,
};

/// A widget with a fixed natural size that paints itself with one character.
#[derive(Debug, Clone)]
pub struct TestWidget {
    pub styles: Styles,
    pub content: Size,
    pub fill: char,
    pub style: Style,
}

impl TestWidget {
    pub fn new(styles: Styles) -> Self {
        Self {
            styles,
            content: Size::ZERO,
            fill: '.',
            style: Style::DEFAULT,
        }
    }

    pub fn with_content(mut self, width: i32, height: i32) -> Self {
        self.content = Size::new(width, height);
        self
    }

    pub fn with_fill(mut self, fill: char) -> Self {
        self.fill = fill;
        self
    }
}

impl Widget for TestWidget {
    fn styles(&self) -> &Styles {
        &self.styles
    }

    fn content_width(&self, _container: Size, _viewport: Size) -> i32 {
        self.content.width
    }

    fn content_height(&self, _container: Size, _viewport: Size, _width: i32) -> i32 {
        self.content.height
    }

    fn render_lines(&self, size: Size) -> Result<Lines, RenderError> {
        let text: String = std::iter::repeat_n(self.fill, size.width.max(0) as usize).collect();
        Ok((0..size.height)
            .map(|_| vec![Segment::new(text.clone(), self.style)])
            .collect())
    }
}

pub fn sized(width: f32, height: f32) -> Styles {
    Styles::new().with_size(Scalar::cells(width), Scalar::cells(height))
}

/// A root with the given layout and one child per style.
pub fn build(layout: LayoutKind, children: Vec<Styles>) -> (WidgetTree, WidgetId, Vec<WidgetId>) {
    let mut tree = WidgetTree::new();
    let root = tree.insert_root(TestWidget::new(Styles::new().with_layout(layout)).with_fill(' '));
    let fills = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];
    let ids = children
        .into_iter()
        .enumerate()
        .map(|(index, styles)| {
            let fill = fills[index % fills.len()];
            tree.insert_child(root, TestWidget::new(styles).with_fill(fill))
                .expect("root is mounted")
        })
        .collect();
    (tree, root, ids)
}
