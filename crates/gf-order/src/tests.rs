//! Unit tests for gf-order.

#[cfg(test)]
mod helpers {
    use gf_core::{OrderId, ShelfId, StationId, Tick};

    use crate::Order;

    pub fn order(id: u32, tick: u64) -> Order {
        Order {
            id: OrderId(id),
            created: Tick(tick),
            shelf: ShelfId(id),
            station: StationId(0),
        }
    }
}

#[cfg(test)]
mod queue {
    use gf_core::{OrderId, Tick};

    use super::helpers::order;
    use crate::OrderQueue;

    #[test]
    fn release_respects_creation_ticks() {
        let mut q = OrderQueue::new(vec![order(0, 0), order(1, 3), order(2, 3), order(3, 7)]);
        assert_eq!(q.pending_count(), 0);
        assert_eq!(q.unreleased_count(), 4);

        assert_eq!(q.release_due(Tick(0)), 1);
        assert_eq!(q.pending_count(), 1);

        // Nothing due at tick 1.
        assert_eq!(q.release_due(Tick(1)), 0);

        // Ticks 2..=3 release both tick-3 orders in submission order.
        assert_eq!(q.release_due(Tick(3)), 2);
        let pending: Vec<OrderId> = q.pending().map(|o| o.id).collect();
        assert_eq!(pending, vec![OrderId(0), OrderId(1), OrderId(2)]);
        assert_eq!(q.unreleased_count(), 1);
    }

    #[test]
    fn late_release_catches_up() {
        // A queue never polled until tick 100 releases everything at once.
        let mut q = OrderQueue::new(vec![order(0, 1), order(1, 50)]);
        assert_eq!(q.release_due(Tick(100)), 2);
        assert_eq!(q.unreleased_count(), 0);
    }

    #[test]
    fn take_and_push_front() {
        let mut q = OrderQueue::new(vec![order(0, 0), order(1, 0), order(2, 0)]);
        q.release_due(Tick(0));

        assert!(q.take(OrderId(1)));
        assert!(!q.take(OrderId(1))); // already taken
        let pending: Vec<OrderId> = q.pending().map(|o| o.id).collect();
        assert_eq!(pending, vec![OrderId(0), OrderId(2)]);

        // A failed assignment returns to the head.
        q.push_front(OrderId(1));
        let pending: Vec<OrderId> = q.pending().map(|o| o.id).collect();
        assert_eq!(pending, vec![OrderId(1), OrderId(0), OrderId(2)]);
    }

    #[test]
    fn counts_for_conservation() {
        let q = OrderQueue::new(vec![order(0, 0), order(1, 10), order(2, 999)]);
        assert_eq!(q.total(), 3);
        assert_eq!(q.submitted_by(Tick(10)), 2);
        assert_eq!(q.submitted_by(Tick(1000)), 3);
    }

    #[test]
    fn get_by_id() {
        let q = OrderQueue::new(vec![order(7, 2)]);
        assert_eq!(q.get(OrderId(7)).unwrap().created, Tick(2));
        assert!(q.get(OrderId(8)).is_none());
    }
}

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use gf_core::{OrderId, ShelfId, Tick};

    use crate::{load_orders_reader, OrderError};

    #[test]
    fn parses_sorted_stream() {
        let json = r#"[
            {"id": 0, "tick": 0, "shelf_id": 5, "station_id": 1},
            {"id": 1, "tick": 0, "shelf_id": 2, "station_id": 0},
            {"id": 2, "tick": 9, "shelf_id": 5, "station_id": 1}
        ]"#;
        let orders = load_orders_reader(Cursor::new(json)).unwrap();
        assert_eq!(orders.len(), 3);
        assert_eq!(orders[0].id, OrderId(0));
        assert_eq!(orders[0].shelf, ShelfId(5));
        assert_eq!(orders[2].created, Tick(9));
    }

    #[test]
    fn duplicate_id_rejected() {
        let json = r#"[
            {"id": 0, "tick": 0, "shelf_id": 1, "station_id": 0},
            {"id": 0, "tick": 1, "shelf_id": 2, "station_id": 0}
        ]"#;
        assert!(matches!(
            load_orders_reader(Cursor::new(json)),
            Err(OrderError::DuplicateId(OrderId(0)))
        ));
    }

    #[test]
    fn unsorted_ticks_rejected() {
        let json = r#"[
            {"id": 0, "tick": 5, "shelf_id": 1, "station_id": 0},
            {"id": 1, "tick": 2, "shelf_id": 2, "station_id": 0}
        ]"#;
        assert!(matches!(
            load_orders_reader(Cursor::new(json)),
            Err(OrderError::NotSorted { id: OrderId(1), .. })
        ));
    }

    #[test]
    fn garbage_is_parse_error() {
        assert!(matches!(
            load_orders_reader(Cursor::new("not json")),
            Err(OrderError::Parse(_))
        ));
    }

    #[test]
    fn empty_stream_is_fine() {
        let orders = load_orders_reader(Cursor::new("[]")).unwrap();
        assert!(orders.is_empty());
    }
}
