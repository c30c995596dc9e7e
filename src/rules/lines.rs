use super::marks::Marks;
use crate::geometry::{LineId, PERIMETER};

/// All five cells of `line` are marked.
pub fn is_line_complete(marks: &Marks, line: LineId) -> bool {
    line.cells().iter().all(|&i| marks.is_marked(i))
}

/// Complete lines in fixed order: rows, columns, `diagMain`, `diagAnti`.
pub fn completed_lines(marks: &Marks) -> Vec<LineId> {
    LineId::ALL.into_iter().filter(|&line| is_line_complete(marks, line)).collect()
}

pub fn completed_line_count(marks: &Marks) -> usize {
    LineId::ALL.into_iter().filter(|&line| is_line_complete(marks, line)).count()
}

/// Every perimeter cell is marked.
pub fn is_box_complete(marks: &Marks) -> bool {
    PERIMETER.iter().all(|&i| marks.is_marked(i))
}

/// Both diagonals are complete.
pub fn is_x_complete(marks: &Marks) -> bool {
    is_line_complete(marks, LineId::DiagMain) && is_line_complete(marks, LineId::DiagAnti)
}

pub fn is_blackout(marks: &Marks) -> bool {
    marks.count() == marks.as_array().len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CELL_COUNT;

    fn marks_at(indices: &[usize]) -> Marks {
        let mut m = [false; CELL_COUNT];
        for &i in indices {
            m[i] = true;
        }
        Marks::from(m)
    }

    #[test]
    fn single_row() {
        let m = marks_at(&[5, 6, 7, 8, 9, 12]);
        assert!(is_line_complete(&m, LineId::Row(1)));
        assert!(!is_line_complete(&m, LineId::Row(2)));
        assert_eq!(completed_lines(&m), vec![LineId::Row(1)]);
    }

    #[test]
    fn order_is_rows_then_cols_then_diagonals() {
        let m = marks_at(&[0, 6, 12, 18, 24, 4, 8, 16, 20, 1, 2, 3, 5, 10, 15]);
        assert_eq!(
            completed_lines(&m),
            vec![LineId::Row(0), LineId::Col(0), LineId::DiagMain, LineId::DiagAnti]
        );
        assert_eq!(completed_line_count(&m), 4);
    }

    #[test]
    fn box_does_not_need_interior() {
        let m = marks_at(&PERIMETER);
        assert!(is_box_complete(&m));
        assert!(!is_blackout(&m));
        assert_eq!(completed_line_count(&m), 4);
    }

    #[test]
    fn x_needs_both_diagonals() {
        let main = marks_at(&[0, 6, 12, 18, 24]);
        assert!(!is_x_complete(&main));
        let both = marks_at(&[0, 6, 12, 18, 24, 4, 8, 16, 20]);
        assert!(is_x_complete(&both));
    }

    #[test]
    fn blackout_needs_everything() {
        assert!(is_blackout(&Marks::from([true; CELL_COUNT])));
        let mut m = [true; CELL_COUNT];
        m[24] = false;
        assert!(!is_blackout(&Marks::from(m)));
    }
}
