diesel::table! {
    hostels (id) {
        id -> Int4,
        #[max_length = 255]
        name -> Varchar,
        #[max_length = 16]
        kind -> Varchar,
        address -> Text,
        total_rooms -> Int4,
        total_capacity -> Int4,
        current_occupancy -> Int4,
        is_active -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    rooms (id) {
        id -> Int4,
        hostel_id -> Int4,
        #[max_length = 32]
        room_number -> Varchar,
        #[max_length = 16]
        kind -> Varchar,
        capacity -> Int4,
        floor -> Int4,
        monthly_rent -> Int4,
        current_occupancy -> Int4,
        is_active -> Bool,
    }
}

diesel::table! {
    room_members (id) {
        id -> Int4,
        room_id -> Int4,
        student_id -> Int4,
    }
}

diesel::table! {
    students (id) {
        id -> Int4,
        #[max_length = 64]
        student_id -> Varchar,
        #[max_length = 255]
        name -> Varchar,
        #[max_length = 255]
        email -> Varchar,
        #[max_length = 32]
        phone -> Varchar,
        #[max_length = 128]
        course -> Varchar,
        year -> Int4,
        #[max_length = 16]
        gender -> Varchar,
        hostel_id -> Nullable<Int4>,
        room_id -> Nullable<Int4>,
        is_active -> Bool,
        admission_date -> Timestamptz,
    }
}

diesel::table! {
    complaints (id) {
        id -> Int4,
        student_id -> Int4,
        #[max_length = 255]
        subject -> Varchar,
        description -> Text,
        #[max_length = 32]
        category -> Varchar,
        #[max_length = 16]
        priority -> Varchar,
        #[max_length = 16]
        status -> Varchar,
        resolution -> Text,
        resolved_at -> Nullable<Timestamptz>,
        resolved_by -> Nullable<Int4>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    complaint_comments (id) {
        id -> Int4,
        complaint_id -> Int4,
        author_id -> Int4,
        #[max_length = 16]
        author_role -> Varchar,
        message -> Text,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(rooms -> hostels (hostel_id));
diesel::joinable!(room_members -> rooms (room_id));
diesel::joinable!(complaint_comments -> complaints (complaint_id));

diesel::allow_tables_to_appear_in_same_query!(
    hostels,
    rooms,
    room_members,
    students,
    complaints,
    complaint_comments,
);
